//! Schedule (solution) model.
//!
//! A schedule result maps every input event to a stage and keeps the
//! per-stage timelines alongside. Timelines are derived data: they are
//! fully determined by the assignment plus the original event list.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Event;

/// A stage identifier.
///
/// Stage IDs are 1-based and densely allocated: a schedule with `n`
/// stages uses exactly the IDs `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub u32);

impl StageId {
    /// The first stage.
    pub const FIRST: StageId = StageId(1);

    /// Returns the raw numeric ID.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The stage allocated right after this one.
    #[inline]
    pub fn next(self) -> StageId {
        StageId(self.0 + 1)
    }

    /// Zero-based position of this stage in `ScheduleResult::timelines`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stage of one event, recorded at the event's input position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssignment {
    /// Event name (denormalized for lookup and display).
    pub name: String,
    /// Assigned stage.
    pub stage: StageId,
}

/// Event → stage mapping, in input order.
///
/// Stored per input position rather than keyed by name, so two events
/// sharing a name each keep their own stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    entries: Vec<StageAssignment>,
}

impl Assignment {
    /// Builds an assignment from per-position entries.
    pub fn from_entries(entries: Vec<StageAssignment>) -> Self {
        Self { entries }
    }

    /// Stage of the first event named `name`.
    pub fn get(&self, name: &str) -> Option<StageId> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.stage)
    }

    /// Stage of the event at input position `index`.
    pub fn stage_at(&self, index: usize) -> Option<StageId> {
        self.entries.get(index).map(|e| e.stage)
    }

    /// Iterates entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = &StageAssignment> {
        self.entries.iter()
    }

    /// Number of assigned events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no event is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The ordered events hosted by one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimeline {
    /// Stage this timeline belongs to.
    pub stage: StageId,
    /// Events in placement order (ascending `(start, end)`).
    pub events: Vec<Event>,
}

impl StageTimeline {
    /// Creates an empty timeline for a stage.
    pub fn new(stage: StageId) -> Self {
        Self {
            stage,
            events: Vec::new(),
        }
    }

    /// Events sorted by start time (stable).
    pub fn by_start(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Total occupied instants on this stage.
    pub fn busy_time(&self) -> i64 {
        self.events
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.span()))
    }
}

/// Output of one allocation: assignment, timelines and stage count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Event → stage, in input order.
    pub assignment: Assignment,
    /// `timelines[k]` is the timeline of stage `k + 1`.
    pub timelines: Vec<StageTimeline>,
    /// Highest stage ID ever allocated.
    pub stage_count: usize,
}

impl ScheduleResult {
    /// Creates an empty result (zero stages).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.stage_count == 0
    }

    /// Timeline of a given stage.
    pub fn timeline(&self, stage: StageId) -> Option<&StageTimeline> {
        self.timelines.get(stage.index()).filter(|t| t.stage == stage)
    }

    /// Iterates stage IDs in ascending order.
    pub fn stages(&self) -> impl Iterator<Item = StageId> + '_ {
        self.timelines.iter().map(|t| t.stage)
    }

    /// Number of events hosted across all stages.
    pub fn event_count(&self) -> usize {
        self.timelines.iter().map(|t| t.events.len()).sum()
    }
}
