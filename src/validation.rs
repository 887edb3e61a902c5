//! Schedule and input validation.
//!
//! [`validate`] independently re-checks an allocation: for every stage,
//! the events assigned to it, sorted by start time, must each end strictly
//! before the next one starts. It is an explicit step; the allocator never
//! runs it implicitly.
//!
//! [`check_input`] reports suspicious but schedulable input, such as
//! duplicate event names.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::models::{Assignment, Event, StageId};

/// Two events placed on the same stage overlap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stage {stage}: '{first}' overlaps '{second}'")]
pub struct OverlapError {
    /// Stage hosting both events.
    pub stage: StageId,
    /// Earlier event (by start time).
    pub first: Event,
    /// Later event, starting at or before `first.end`.
    pub second: Event,
}

/// A failed schedule check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two events on one stage overlap.
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    /// The assignment does not cover the event list one-to-one.
    #[error("assignment covers {assigned} events, expected {events}")]
    LengthMismatch {
        /// Number of input events.
        events: usize,
        /// Number of assignment entries.
        assigned: usize,
    },
}

/// Validation result.
pub type ValidationResult = Result<(), ValidationError>;

/// Verifies that no stage hosts two overlapping events.
///
/// `assignment` must be positional over `events` (entry `i` belongs to
/// `events[i]`), as produced by the allocator. Reports the first overlap
/// found, scanning stages in ascending order.
///
/// # Complexity
/// O(n log n).
pub fn validate(events: &[Event], assignment: &Assignment) -> ValidationResult {
    if events.len() != assignment.len() {
        return Err(ValidationError::LengthMismatch {
            events: events.len(),
            assigned: assignment.len(),
        });
    }

    let mut by_stage: BTreeMap<StageId, Vec<&Event>> = BTreeMap::new();
    for (event, entry) in events.iter().zip(assignment.iter()) {
        by_stage.entry(entry.stage).or_default().push(event);
    }

    for (stage, mut hosted) in by_stage {
        hosted.sort_by_key(|e| e.start);
        for pair in hosted.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(OverlapError {
                    stage,
                    first: pair[0].clone(),
                    second: pair[1].clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// A non-fatal input issue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputWarning {
    /// More than one event carries the same name; name lookups on the
    /// assignment return only the first.
    #[error("event name '{name}' used {count} times")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// How many events share it.
        count: usize,
    },
}

/// Reports input issues that do not block scheduling.
///
/// Warnings are ordered by first occurrence of the offending name.
pub fn check_input(events: &[Event]) -> Vec<InputWarning> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for e in events {
        let count = counts.entry(e.name.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(e.name.as_str());
        }
        *count += 1;
    }

    first_seen
        .into_iter()
        .filter_map(|name| {
            let count = counts[name];
            (count > 1).then(|| InputWarning::DuplicateName {
                name: name.to_string(),
                count,
            })
        })
        .collect()
}
