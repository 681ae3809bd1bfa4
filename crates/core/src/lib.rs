//! Uplify core data models.
//!
//! Goals, their daily completion logs, and the summary views derived from
//! them.

#![warn(missing_docs)]

mod id;
mod error;
mod goal;
mod log;
mod summary;

pub use id::GoalId;
pub use error::GoalError;
pub use goal::{Goal, GoalPatch, GoalRecord, NewGoal, Priority};
pub use log::{parse_date, DailyProgress, ProgressLog};
pub use summary::{GoalStats, ProgressSummary};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
