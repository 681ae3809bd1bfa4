//! Completion date estimation.

use chrono::{Days, NaiveDate};
use uplify_core::Goal;

/// Completion date estimator.
///
/// Assumes one completed day per calendar day from now on.
pub struct CompletionEstimator;

impl CompletionEstimator {
    /// Completed days still needed to reach the target.
    pub fn remaining_days(&self, goal: &Goal) -> u32 {
        (goal.target_days as usize).saturating_sub(goal.completed_days()) as u32
    }

    /// Earliest date the goal can reach its target.
    ///
    /// A completed goal estimates to `today`. If today is already done, the
    /// next countable day is tomorrow.
    pub fn estimate_goal(&self, goal: &Goal, today: NaiveDate) -> Option<NaiveDate> {
        let remaining = self.remaining_days(goal) as u64;
        if remaining == 0 {
            return Some(today);
        }

        let done_today = goal.progress.get(today).is_some_and(|e| e.completed);
        let offset = if done_today { remaining } else { remaining - 1 };
        today.checked_add_days(Days::new(offset))
    }
}

impl Default for CompletionEstimator {
    fn default() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uplify_core::{DailyProgress, NewGoal};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn goal(target_days: u32) -> Goal {
        Goal::new(NewGoal::new("Practice piano", target_days)).unwrap()
    }

    #[test]
    fn test_estimate_fresh_goal() {
        let estimator = CompletionEstimator;
        let g = goal(3);
        assert_eq!(estimator.remaining_days(&g), 3);
        assert_eq!(
            estimator.estimate_goal(&g, today()),
            NaiveDate::from_ymd_opt(2024, 6, 17)
        );
    }

    #[test]
    fn test_estimate_when_today_done() {
        let estimator = CompletionEstimator;
        let mut g = goal(3);
        g.progress.upsert(DailyProgress::new(today(), true, None));
        assert_eq!(estimator.remaining_days(&g), 2);
        assert_eq!(
            estimator.estimate_goal(&g, today()),
            NaiveDate::from_ymd_opt(2024, 6, 17)
        );
    }

    #[test]
    fn test_estimate_completed_goal() {
        let estimator = CompletionEstimator;
        let mut g = goal(1);
        g.progress
            .upsert(DailyProgress::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), true, None));
        assert_eq!(estimator.remaining_days(&g), 0);
        assert_eq!(estimator.estimate_goal(&g, today()), Some(today()));
    }
}
