//! Progress and streak engine.
//!
//! Pure computations over goal logs, plus the tracker that owns the goal
//! collection and notifies an observer after each mutation.

#![warn(missing_docs)]

pub mod streak;
pub mod stats;
pub mod observer;
pub mod tracker;
pub mod estimator;

pub use streak::{current_streak, longest_streak};
pub use stats::{goal_progress, goal_stats, progress_percentage};
pub use observer::{Mutation, MutationObserver, NoopObserver, PendingChanges};
pub use tracker::{local_today, Clock, GoalTracker};
pub use estimator::CompletionEstimator;
