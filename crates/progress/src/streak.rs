//! Streak computation over a goal's completion log.
//!
//! Both functions work on whole calendar days; time of day never participates.

use chrono::NaiveDate;
use uplify_core::ProgressLog;

/// Consecutive completed days counted backward from `today`.
///
/// Completed dates are walked newest first with a cursor starting at `today`.
/// The first date must equal the cursor and every following date must sit
/// exactly one day before the previous match. The walk stops at the first
/// date that breaks this, so a missing today yields 0 and a single gap ends
/// the streak even if older entries form a longer run. A completed entry
/// dated after `today` also stops the walk immediately.
pub fn current_streak(log: &ProgressLog, today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = log.completed_dates().collect();
    if dates.is_empty() {
        return 0;
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0;
    let mut cursor = today;
    for date in dates {
        let expected_gap = if streak == 0 { 0 } else { 1 };
        if (cursor - date).num_days() != expected_gap {
            break;
        }
        streak += 1;
        cursor = date;
    }
    streak
}

/// Length of the longest run of consecutive completed days anywhere in the log.
pub fn longest_streak(log: &ProgressLog) -> u32 {
    let mut dates: Vec<NaiveDate> = log.completed_dates().collect();
    if dates.is_empty() {
        return 0;
    }
    dates.sort_unstable();

    let mut longest = 1;
    let mut current = 1;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}
