//! Stage-scheduling domain models.
//!
//! Provides the data types for representing an interval-partitioning
//! problem (a list of events) and its solution (a stage assignment).
//!
//! # Domain Mappings
//!
//! | u-stage | Festival | Conference | Operating Theatre |
//! |---------|----------|------------|-------------------|
//! | Event | Show | Talk | Surgery |
//! | Stage | Stage | Room | Theatre |
//! | Timeline | Running order | Room plan | Theatre list |

mod event;
mod schedule;

pub use event::Event;
pub use schedule::{Assignment, ScheduleResult, StageAssignment, StageId, StageTimeline};
