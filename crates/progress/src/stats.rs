//! Per-goal summaries and cross-goal statistics.

use chrono::NaiveDate;
use uplify_core::{Goal, GoalStats, ProgressSummary};

use crate::estimator::CompletionEstimator;
use crate::streak::{current_streak, longest_streak};

/// Completed days as a percentage of the target, clamped to 100.
///
/// A zero target yields 0 rather than dividing by zero.
pub fn progress_percentage(completed_days: usize, target_days: u32) -> f64 {
    if target_days == 0 {
        return 0.0;
    }
    let pct = completed_days as f64 / target_days as f64 * 100.0;
    pct.min(100.0)
}

/// Summarize one goal's progress as of `today`.
pub fn goal_progress(goal: &Goal, today: NaiveDate) -> ProgressSummary {
    let completed_days = goal.completed_days();
    ProgressSummary {
        completed_days,
        total_days: goal.target_days,
        progress_percentage: progress_percentage(completed_days, goal.target_days),
        current_streak: current_streak(&goal.progress, today),
        longest_streak: longest_streak(&goal.progress),
        remaining_days: CompletionEstimator.remaining_days(goal),
        is_completed_today: goal.progress.get(today).is_some_and(|e| e.completed),
    }
}

/// Aggregate statistics over every goal, as of `today`.
pub fn goal_stats(goals: &[Goal], today: NaiveDate) -> GoalStats {
    let total_goals = goals.len();
    let completed_goals = goals.iter().filter(|g| g.is_completed()).count();
    let total_days_tracked: usize = goals.iter().map(Goal::completed_days).sum();

    let current_streak = goals
        .iter()
        .map(|g| current_streak(&g.progress, today))
        .max()
        .unwrap_or(0);
    let longest_streak = goals
        .iter()
        .map(|g| longest_streak(&g.progress))
        .max()
        .unwrap_or(0);

    let completion_rate = if total_goals > 0 {
        completed_goals as f64 / total_goals as f64 * 100.0
    } else {
        0.0
    };

    GoalStats {
        total_goals,
        completed_goals,
        active_goals: total_goals - completed_goals,
        total_days_tracked,
        current_streak,
        longest_streak,
        completion_rate,
    }
}
