//! Stage allocation and KPI evaluation.
//!
//! # Algorithm
//!
//! `StageAllocator` solves interval partitioning greedily: events are
//! processed by start time and each one takes the lowest-numbered stage
//! that is already free, opening a new stage only when none is. The
//! result uses the minimum possible number of stages.
//!
//! # KPI
//!
//! `StageKpi` reports stage count, peak depth, horizon and utilization.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Cormen et al. (2009), "Introduction to Algorithms", Problem 16-1

mod allocator;
mod kpi;

pub use allocator::{allocate, scheduling_order, StageAllocator};
pub use kpi::{peak_depth, StageKpi};
