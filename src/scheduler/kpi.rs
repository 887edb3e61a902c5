//! Stage schedule metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Stage count | Stages opened by the allocator |
//! | Peak depth | Max events sharing one instant (lower bound on stages) |
//! | Horizon | `min start ..= max end`, in instants |
//! | Busy time | Occupied instants per stage (inclusive spans) |
//! | Avg Utilization | Mean of busy time / horizon over stages |

use crate::models::{Event, ScheduleResult};

/// Schedule quality indicators for one allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct StageKpi {
    /// Stages used.
    pub stage_count: usize,
    /// Events scheduled.
    pub event_count: usize,
    /// Peak depth of the input events.
    pub peak_depth: usize,
    /// Earliest start, `None` for empty input.
    pub horizon_start: Option<i64>,
    /// Latest end, `None` for empty input.
    pub horizon_end: Option<i64>,
    /// Occupied instants per stage; index `k` is stage `k + 1`.
    pub busy_by_stage: Vec<i64>,
    /// Average stage utilization (0.0..=1.0).
    pub avg_utilization: f64,
}

impl StageKpi {
    /// Computes KPIs from the input events and their allocation.
    pub fn calculate(events: &[Event], result: &ScheduleResult) -> Self {
        let horizon_start = events.iter().map(|e| e.start).min();
        let horizon_end = events.iter().map(|e| e.end).max();
        let horizon_len = match (horizon_start, horizon_end) {
            (Some(s), Some(e)) => e.saturating_sub(s).saturating_add(1),
            _ => 0,
        };

        let busy_by_stage: Vec<i64> = result.timelines.iter().map(|t| t.busy_time()).collect();

        let avg_utilization = if busy_by_stage.is_empty() || horizon_len <= 0 {
            0.0
        } else {
            let sum: f64 = busy_by_stage
                .iter()
                .map(|&busy| busy as f64 / horizon_len as f64)
                .sum();
            sum / busy_by_stage.len() as f64
        };

        Self {
            stage_count: result.stage_count,
            event_count: events.len(),
            peak_depth: peak_depth(events),
            horizon_start,
            horizon_end,
            busy_by_stage,
            avg_utilization,
        }
    }

    /// Whether the stage count meets the depth lower bound.
    pub fn is_minimal(&self) -> bool {
        self.stage_count == self.peak_depth
    }
}

/// Maximum number of events occupying a single instant.
///
/// Sweep line over interval endpoints. At equal times, openings are
/// processed before closings so that touching closed intervals count as
/// overlapping.
pub fn peak_depth(events: &[Event]) -> usize {
    // (time, 0 = open / 1 = close)
    let mut points: Vec<(i64, u8)> = Vec::with_capacity(events.len() * 2);
    for e in events {
        points.push((e.start, 0));
        points.push((e.end, 1));
    }
    points.sort_unstable();

    let mut depth = 0usize;
    let mut peak = 0usize;
    for (_, kind) in points {
        if kind == 0 {
            depth += 1;
            peak = peak.max(depth);
        } else {
            depth -= 1;
        }
    }
    peak
}
