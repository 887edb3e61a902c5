//! Greedy interval-partitioning stage allocator.
//!
//! # Algorithm
//!
//! 1. Sort events by `(start, end)` ascending (stable, so exact ties keep
//!    their input order).
//! 2. Keep a min-heap of busy stages keyed by `(end, stage)` and a min-heap
//!    of free stage IDs.
//! 3. For each event, release every busy stage whose end is strictly
//!    before the event's start, then take the lowest free stage ID or
//!    open a new stage.
//!
//! The number of stages opened equals the peak depth of the event set,
//! which is the lower bound for any valid assignment.
//!
//! # Complexity
//! O(n log n) for sorting plus O(n log k) heap work, k = stage count.
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1: Interval Partitioning

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::models::{Assignment, Event, ScheduleResult, StageAssignment, StageId, StageTimeline};
use crate::validation::{self, ValidationError};

/// Minimum-stage allocator.
///
/// Stateless: every call works on its own heaps, so one allocator can be
/// shared freely between threads and invocations.
///
/// # Example
///
/// ```
/// use u_stage::models::{Event, StageId};
/// use u_stage::scheduler::StageAllocator;
///
/// let events = vec![
///     Event::new("A", 0, 10),
///     Event::new("B", 5, 15),
///     Event::new("C", 11, 20),
/// ];
/// let result = StageAllocator::new().allocate(&events);
/// assert_eq!(result.stage_count, 2);
/// assert_eq!(result.assignment.get("C"), Some(StageId(1)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StageAllocator;

impl StageAllocator {
    /// Creates a new allocator.
    pub fn new() -> Self {
        Self
    }

    /// Assigns every event to a stage using the fewest stages possible.
    ///
    /// Total for well-formed events (`end >= start`); the result is not
    /// re-verified. Use [`allocate_checked`](Self::allocate_checked) to
    /// run the validator as well.
    pub fn allocate(&self, events: &[Event]) -> ScheduleResult {
        if events.is_empty() {
            return ScheduleResult::new();
        }

        let order = scheduling_order(events);

        let mut busy: BinaryHeap<Reverse<(i64, StageId)>> = BinaryHeap::new();
        let mut free: BinaryHeap<Reverse<StageId>> = BinaryHeap::new();
        let mut next_stage = StageId::FIRST;
        let mut stages = vec![StageId::FIRST; events.len()];
        let mut timelines: Vec<StageTimeline> = Vec::new();

        for &idx in &order {
            let event = &events[idx];

            // Strict `<`: a stage whose last event ends at t is still busy at t.
            while let Some(&Reverse((end, stage))) = busy.peek() {
                if end >= event.start {
                    break;
                }
                busy.pop();
                free.push(Reverse(stage));
            }

            let stage = match free.pop() {
                Some(Reverse(stage)) => stage,
                None => {
                    let stage = next_stage;
                    next_stage = next_stage.next();
                    timelines.push(StageTimeline::new(stage));
                    stage
                }
            };

            trace!(event = %event.name, start = event.start, end = event.end, %stage, "placed");

            stages[idx] = stage;
            timelines[stage.index()].events.push(event.clone());
            busy.push(Reverse((event.end, stage)));
        }

        let assignment = Assignment::from_entries(
            events
                .iter()
                .zip(stages)
                .map(|(event, stage)| StageAssignment {
                    name: event.name.clone(),
                    stage,
                })
                .collect(),
        );

        let stage_count = timelines.len();
        debug!(events = events.len(), stages = stage_count, "allocation complete");

        ScheduleResult {
            assignment,
            timelines,
            stage_count,
        }
    }

    /// Allocates, then runs the schedule validator on the result.
    ///
    /// An error here means the allocator itself is broken; it never
    /// signals bad input.
    pub fn allocate_checked(&self, events: &[Event]) -> Result<ScheduleResult, ValidationError> {
        let result = self.allocate(events);
        validation::validate(events, &result.assignment)?;
        Ok(result)
    }
}

/// Allocates with a default [`StageAllocator`].
pub fn allocate(events: &[Event]) -> ScheduleResult {
    StageAllocator::new().allocate(events)
}

/// Returns event indices in scheduling order: by `(start, end)`, exact
/// ties in input order.
pub fn scheduling_order(events: &[Event]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| events[i].sort_key());
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn ev(name: &str, start: i64, end: i64) -> Event {
        Event::new(name, start, end)
    }

    /// Max number of events containing any single instant.
    fn brute_force_depth(events: &[Event]) -> usize {
        events
            .iter()
            .map(|probe| events.iter().filter(|e| e.contains(probe.start)).count())
            .max()
            .unwrap_or(0)
    }

    fn assert_no_overlap(result: &ScheduleResult) {
        for timeline in &result.timelines {
            let sorted = timeline.by_start();
            for pair in sorted.windows(2) {
                assert!(
                    pair[0].end < pair[1].start,
                    "stage {} hosts overlapping {} and {}",
                    timeline.stage,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    fn random_events(rng: &mut SmallRng, n: usize, horizon: i64, max_len: i64) -> Vec<Event> {
        (0..n)
            .map(|i| {
                let start = rng.random_range(0..horizon);
                let len = rng.random_range(0..max_len);
                ev(&format!("E{i}"), start, start + len)
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let result = allocate(&[]);
        assert_eq!(result.stage_count, 0);
        assert!(result.assignment.is_empty());
        assert!(result.timelines.is_empty());
    }

    #[test]
    fn test_single_event() {
        let result = allocate(&[ev("solo", 3, 8)]);
        assert_eq!(result.stage_count, 1);
        assert_eq!(result.assignment.get("solo"), Some(StageId(1)));
    }

    #[test]
    fn test_reuses_stage_after_gap() {
        let events = vec![ev("A", 0, 10), ev("B", 5, 15), ev("C", 11, 20)];
        let result = allocate(&events);

        assert_eq!(result.stage_count, 2);
        assert_eq!(result.assignment.get("A"), Some(StageId(1)));
        assert_eq!(result.assignment.get("B"), Some(StageId(2)));
        assert_eq!(result.assignment.get("C"), Some(StageId(1)));

        let stage1: Vec<&str> = result.timelines[0]
            .events
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(stage1, vec!["A", "C"]);
    }

    #[test]
    fn test_back_to_back_is_overlap() {
        let result = allocate(&[ev("A", 0, 5), ev("B", 5, 10)]);
        assert_eq!(result.stage_count, 2);
    }

    #[test]
    fn test_one_instant_gap_shares_stage() {
        let result = allocate(&[ev("A", 0, 5), ev("B", 6, 10)]);
        assert_eq!(result.stage_count, 1);
        assert_eq!(result.assignment.get("B"), Some(StageId(1)));
    }

    #[test]
    fn test_sorted_by_start_then_end() {
        // Input order differs from scheduling order.
        let events = vec![ev("late", 20, 30), ev("long", 0, 50), ev("short", 0, 5)];
        assert_eq!(scheduling_order(&events), vec![2, 1, 0]);

        let result = allocate(&events);
        assert_eq!(result.assignment.get("short"), Some(StageId(1)));
        assert_eq!(result.assignment.get("long"), Some(StageId(2)));
        // "short" freed stage 1 before "late" starts.
        assert_eq!(result.assignment.get("late"), Some(StageId(1)));
    }

    #[test]
    fn test_exact_ties_follow_input_order() {
        let forward = allocate(&[ev("X", 0, 10), ev("Y", 0, 10)]);
        assert_eq!(forward.assignment.get("X"), Some(StageId(1)));
        assert_eq!(forward.assignment.get("Y"), Some(StageId(2)));

        let reversed = allocate(&[ev("Y", 0, 10), ev("X", 0, 10)]);
        assert_eq!(reversed.assignment.get("Y"), Some(StageId(1)));
        assert_eq!(reversed.assignment.get("X"), Some(StageId(2)));
    }

    #[test]
    fn test_lowest_free_stage_preferred() {
        let events = vec![
            ev("A", 0, 10),
            ev("B", 0, 20),
            ev("C", 0, 5),
            ev("D", 12, 30),
            ev("E", 13, 14),
        ];
        let result = allocate(&events);
        // Scheduling order: C(1), A(2), B(3); at t=12 stages 1 and 2 are free.
        assert_eq!(result.assignment.get("C"), Some(StageId(1)));
        assert_eq!(result.assignment.get("A"), Some(StageId(2)));
        assert_eq!(result.assignment.get("B"), Some(StageId(3)));
        assert_eq!(result.assignment.get("D"), Some(StageId(1)));
        assert_eq!(result.assignment.get("E"), Some(StageId(2)));
        assert_eq!(result.stage_count, 3);
    }

    #[test]
    fn test_lower_id_wins_over_earlier_release() {
        // Stage 2 frees at 3, stage 1 frees at 8; both free by t=10.
        let events = vec![ev("P", 0, 8), ev("Q", 1, 3), ev("R", 10, 12)];
        let result = allocate(&events);
        assert_eq!(result.assignment.get("R"), Some(StageId(1)));
    }

    #[test]
    fn test_duplicate_names_each_assigned() {
        let events = vec![ev("dup", 0, 10), ev("dup", 5, 15)];
        let result = allocate(&events);
        assert_eq!(result.assignment.stage_at(0), Some(StageId(1)));
        assert_eq!(result.assignment.stage_at(1), Some(StageId(2)));
        assert_eq!(result.event_count(), 2);
    }

    #[test]
    fn test_nested_all_overlap() {
        let events: Vec<Event> = (0..6).map(|i| ev(&format!("N{i}"), i, 100 - i)).collect();
        let result = allocate(&events);
        assert_eq!(result.stage_count, 6);
    }

    #[test]
    fn test_extreme_bounds() {
        let events = vec![ev("min", i64::MIN, i64::MIN), ev("max", i64::MAX, i64::MAX)];
        let result = allocate(&events);
        assert_eq!(result.stage_count, 1);
    }

    #[test]
    fn test_deterministic() {
        let mut rng = SmallRng::seed_from_u64(7);
        let events = random_events(&mut rng, 200, 1000, 50);
        assert_eq!(allocate(&events), allocate(&events));
    }

    #[test]
    fn test_random_minimal_and_valid() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let n = rng.random_range(0..40);
            let events = random_events(&mut rng, n, 100, 20);
            let result = allocate(&events);

            assert_eq!(result.stage_count, brute_force_depth(&events));
            assert_eq!(result.assignment.len(), events.len());
            assert_eq!(result.event_count(), events.len());
            assert_no_overlap(&result);
        }
    }

    #[test]
    fn test_large_random_instance_valid() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let events = random_events(&mut rng, 5000, 100_000, 500);
        let result = StageAllocator::new().allocate_checked(&events).unwrap();
        assert_eq!(result.event_count(), 5000);
        assert_no_overlap(&result);
    }

    #[test]
    fn test_stage_ids_dense() {
        let mut rng = SmallRng::seed_from_u64(3);
        let events = random_events(&mut rng, 300, 500, 40);
        let result = allocate(&events);
        let ids: Vec<u32> = result.stages().map(StageId::get).collect();
        let expected: Vec<u32> = (1..=result.stage_count as u32).collect();
        assert_eq!(ids, expected);
        assert!(result.timelines.iter().all(|t| !t.events.is_empty()));
    }
}
