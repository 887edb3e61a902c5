//! Minimum-stage interval partitioning.
//!
//! Assigns a set of named, closed time intervals ("events") to the fewest
//! parallel stages such that no two events on one stage share an instant.
//! End times are inclusive: an event ending at `t` and one starting at `t`
//! cannot share a stage.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Event`, `StageId`, `Assignment`,
//!   `StageTimeline`, `ScheduleResult`
//! - **`parser`**: Line-based event input (`<name> <start> <end>`)
//! - **`scheduler`**: Greedy stage allocator and schedule KPIs
//! - **`validation`**: Independent overlap check and input warnings
//! - **`report`**: Plain-text rendering of a schedule
//!
//! # Example
//!
//! ```
//! use u_stage::{parser, report, scheduler, validation};
//!
//! let events = parser::parse_str("A 0 10\nB 5 15\nC 11 20\n").unwrap();
//! let result = scheduler::allocate(&events);
//! validation::validate(&events, &result.assignment).unwrap();
//!
//! assert_eq!(result.stage_count, 2);
//! assert!(report::render_report(&events, &result).starts_with("Total stages required: 2"));
//! ```
//!
//! Every function is pure and reentrant; there is no process-wide state.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Cormen et al. (2009), "Introduction to Algorithms", Problem 16-1

pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
