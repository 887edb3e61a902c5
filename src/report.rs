//! Plain-text schedule report.
//!
//! ```text
//! Total stages required: 2
//!
//! Assignments in input order:
//!   A: 0 - 10  --> Stage 1
//!   B: 5 - 15  --> Stage 2
//!
//! Per-stage timelines:
//! Stage 1:
//!   A: 0 - 10
//!
//! Stage 2:
//!   B: 5 - 15
//!
//! ```

use std::fmt;

use crate::models::{Event, ScheduleResult};

/// Displayable report over the input events and their allocation.
///
/// `events` must be the same list, in the same order, that produced
/// `result`.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    events: &'a [Event],
    result: &'a ScheduleResult,
}

impl<'a> Report<'a> {
    /// Creates a report.
    pub fn new(events: &'a [Event], result: &'a ScheduleResult) -> Self {
        Self { events, result }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total stages required: {}", self.result.stage_count)?;
        writeln!(f)?;

        if self.events.is_empty() {
            return writeln!(f, "Nothing to schedule.");
        }

        writeln!(f, "Assignments in input order:")?;
        for (event, entry) in self.events.iter().zip(self.result.assignment.iter()) {
            writeln!(f, "  {event}  --> Stage {}", entry.stage)?;
        }
        writeln!(f)?;

        writeln!(f, "Per-stage timelines:")?;
        for timeline in &self.result.timelines {
            writeln!(f, "Stage {}:", timeline.stage)?;
            for event in timeline.by_start() {
                writeln!(f, "  {event}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Renders the text report.
pub fn render_report(events: &[Event], result: &ScheduleResult) -> String {
    Report::new(events, result).to_string()
}
