//! Derived views over goals. Recomputed on demand, never stored.

use serde::{Deserialize, Serialize};

/// Progress summary for a single goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Completed days in the log
    pub completed_days: usize,

    /// Target days of the goal
    pub total_days: u32,

    /// Completed over target, as a percentage clamped to 100
    pub progress_percentage: f64,

    /// Consecutive completed days ending today
    pub current_streak: u32,

    /// Longest run of consecutive completed days
    pub longest_streak: u32,

    /// Completed days still needed to reach the target
    pub remaining_days: u32,

    /// Whether today's entry exists and is completed
    pub is_completed_today: bool,
}

/// Aggregate statistics across all goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    /// Number of goals
    pub total_goals: usize,

    /// Goals that reached their target
    pub completed_goals: usize,

    /// Goals still in progress
    pub active_goals: usize,

    /// Completed entries across all goals
    pub total_days_tracked: usize,

    /// Best current streak of any goal
    pub current_streak: u32,

    /// Best streak ever of any goal
    pub longest_streak: u32,

    /// Percentage of goals completed, 0 when there are none
    pub completion_rate: f64,
}
