//! Event (show) model.
//!
//! An event is a named, closed time interval `[start, end]`. Time is a
//! discrete integer axis and the end instant is **inclusive**: an event
//! ending at `t` still occupies `t`, so another event starting at `t`
//! overlaps it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A time-bounded event to be placed on a stage.
///
/// Events are immutable once parsed; the allocator only reads them.
/// `end >= start` is a precondition that the parser enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Event name. Used as a key, but uniqueness is not enforced.
    pub name: String,
    /// First occupied instant.
    pub start: i64,
    /// Last occupied instant (inclusive).
    pub end: i64,
}

impl Event {
    /// Creates a new event.
    pub fn new(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Number of occupied instants (`end - start + 1`).
    ///
    /// Saturates instead of overflowing on extreme bounds.
    #[inline]
    pub fn span(&self) -> i64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Whether this event occupies instant `t`.
    #[inline]
    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Whether two events share at least one instant.
    ///
    /// Under the inclusive-end rule two events can coexist on a stage only
    /// if one ends strictly before the other starts.
    #[inline]
    pub fn overlaps(&self, other: &Event) -> bool {
        !(self.end < other.start || other.end < self.start)
    }

    /// Scheduling order key: start time first, end time breaks ties.
    #[inline]
    pub fn sort_key(&self) -> (i64, i64) {
        (self.start, self.end)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.name, self.start, self.end)
    }
}
