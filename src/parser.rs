//! Event parser.
//!
//! Converts raw text records into validated [`Event`]s, one per line:
//!
//! ```text
//! <name> <start> <end>
//! ```
//!
//! Tokens are separated by arbitrary whitespace. Blank lines and lines
//! whose first non-whitespace character is `#` are skipped. Tokens past
//! the third are ignored. Line numbers in errors are 1-based and count
//! every input line, skipped ones included.

use thiserror::Error;

use crate::models::Event;

/// A malformed input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {content:?}")]
pub struct FormatError {
    /// 1-based line number.
    pub line: usize,
    /// The raw line, trimmed of surrounding whitespace.
    pub content: String,
    /// What was wrong with it.
    pub kind: FormatErrorKind,
}

/// Categories of format errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    /// Fewer than three whitespace-separated tokens.
    #[error("expected 3 tokens, got {found}")]
    TooFewTokens {
        /// Number of tokens present.
        found: usize,
    },
    /// Start or end is not a (64-bit) integer.
    #[error("start/end must be integers")]
    InvalidInteger,
    /// End precedes start.
    #[error("end before start ({end} < {start})")]
    EndBeforeStart {
        /// Parsed start.
        start: i64,
        /// Parsed end.
        end: i64,
    },
}

impl FormatError {
    fn new(line: usize, content: &str, kind: FormatErrorKind) -> Self {
        Self {
            line,
            content: content.to_string(),
            kind,
        }
    }
}

/// Parses one line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line_no: usize, raw: &str) -> Result<Option<Event>, FormatError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(FormatError::new(
            line_no,
            line,
            FormatErrorKind::TooFewTokens {
                found: tokens.len(),
            },
        ));
    }

    let (start, end) = match (tokens[1].parse::<i64>(), tokens[2].parse::<i64>()) {
        (Ok(start), Ok(end)) => (start, end),
        _ => {
            return Err(FormatError::new(
                line_no,
                line,
                FormatErrorKind::InvalidInteger,
            ))
        }
    };

    if end < start {
        return Err(FormatError::new(
            line_no,
            line,
            FormatErrorKind::EndBeforeStart { start, end },
        ));
    }

    Ok(Some(Event::new(tokens[0], start, end)))
}

/// Parses lines into events, preserving input order.
///
/// Aborts on the first malformed line.
///
/// # Example
/// ```
/// use u_stage::parser::parse_lines;
///
/// let events = parse_lines(["# lineup", "A 0 10", "", "B 5 15"]).unwrap();
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].name, "B");
/// ```
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Event>, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut events = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(event) = parse_line(idx + 1, line.as_ref())? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parses a whole text buffer (one event per line).
pub fn parse_str(text: &str) -> Result<Vec<Event>, FormatError> {
    parse_lines(text.lines())
}

/// Parses lines, skipping malformed ones instead of aborting.
///
/// Returns the valid events in input order and every error encountered.
pub fn parse_lenient<I, S>(lines: I) -> (Vec<Event>, Vec<FormatError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut events = Vec::new();
    let mut errors = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        match parse_line(idx + 1, line.as_ref()) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }
    (events, errors)
}
