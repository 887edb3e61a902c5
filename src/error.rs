//! Crate-level error type.

use thiserror::Error;

use crate::parser::FormatError;
use crate::validation::ValidationError;

/// Errors surfaced by the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input line.
    #[error("invalid input: {0}")]
    Format(#[from] FormatError),

    /// The allocator produced an invalid schedule.
    #[error("internal scheduling error: {0}")]
    Validation(#[from] ValidationError),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding JSON output failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code: 2 for internal errors, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Validation(_) => 2,
            Error::Format(_) | Error::Io(_) | Error::Json(_) => 1,
        }
    }
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
