//! Goal model - a habit pursued over a fixed number of target days.

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::id::GoalId;
use crate::log::ProgressLog;
use crate::Time;

/// A goal the user wants to complete on `target_days` separate days.
///
/// Completion is derived from the log and never stored independently; see
/// [`Goal::is_completed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GoalRecord", into = "GoalRecord")]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Free-form grouping
    pub category: String,

    /// Completed days required to finish the goal
    pub target_days: u32,

    /// When created
    pub created_at: Time,

    /// Priority
    pub priority: Priority,

    /// Daily completion log
    pub progress: ProgressLog,
}

impl Goal {
    /// Create a goal from validated data, with an empty log.
    pub fn new(data: NewGoal) -> Result<Self, GoalError> {
        data.validate()?;
        Ok(Self {
            id: GoalId::new(),
            title: data.title,
            description: data.description,
            category: data.category,
            target_days: data.target_days,
            created_at: chrono::Utc::now(),
            priority: data.priority,
            progress: ProgressLog::new(),
        })
    }

    /// Number of completed days in the log.
    pub fn completed_days(&self) -> usize {
        self.progress.completed_days()
    }

    /// True once the completed-day count reaches `target_days`.
    pub fn is_completed(&self) -> bool {
        self.completed_days() >= self.target_days as usize
    }

    /// Merge a partial update. Nothing is applied if validation fails.
    pub fn apply(&mut self, patch: GoalPatch) -> Result<(), GoalError> {
        patch.validate()?;
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(target_days) = patch.target_days {
            self.target_days = target_days;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        Ok(())
    }
}

/// Goal priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(GoalError::InvalidPriority(s.to_string())),
        }
    }
}

/// Data needed to create a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    /// Goal title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Free-form grouping
    pub category: String,
    /// Completed days required, must be positive
    pub target_days: u32,
    /// Priority
    pub priority: Priority,
}

impl NewGoal {
    /// Minimal goal data with empty description and category.
    pub fn new(title: impl Into<String>, target_days: u32) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: String::new(),
            target_days,
            priority: Priority::default(),
        }
    }

    /// Check target days.
    pub fn validate(&self) -> Result<(), GoalError> {
        validate_target_days(self.target_days)
    }
}

/// Partial update for a goal. `None` leaves a field untouched.
///
/// Identity, creation time and the log cannot be changed this way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New target, must be positive
    pub target_days: Option<u32>,
    /// New priority
    pub priority: Option<Priority>,
}

impl GoalPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.target_days.is_none()
            && self.priority.is_none()
    }

    /// Check the fields that are set.
    pub fn validate(&self) -> Result<(), GoalError> {
        if let Some(days) = self.target_days {
            validate_target_days(days)?;
        }
        Ok(())
    }
}

fn validate_target_days(days: u32) -> Result<(), GoalError> {
    if days == 0 {
        return Err(GoalError::InvalidTargetDays(days));
    }
    Ok(())
}

/// Persisted shape of a goal.
///
/// Carries the derived `isCompleted` flag so stored documents keep the full
/// field set. Loading recomputes the flag; use [`GoalRecord::is_consistent`]
/// to detect stored values that disagree with their log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GoalRecord {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub target_days: u32,
    pub created_at: Time,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub progress: ProgressLog,
    #[serde(default)]
    pub is_completed: bool,
}

impl GoalRecord {
    /// Whether the stored flag matches the completion derived from the log.
    pub fn is_consistent(&self) -> bool {
        self.is_completed == (self.progress.completed_days() >= self.target_days as usize)
    }
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            target_days: record.target_days,
            created_at: record.created_at,
            priority: record.priority,
            progress: record.progress,
        }
    }
}

impl From<Goal> for GoalRecord {
    fn from(goal: Goal) -> Self {
        let is_completed = goal.is_completed();
        Self {
            id: goal.id,
            title: goal.title,
            description: goal.description,
            category: goal.category,
            target_days: goal.target_days,
            created_at: goal.created_at,
            priority: goal.priority,
            progress: goal.progress,
            is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{parse_date, DailyProgress};

    fn create_test_goal(target_days: u32) -> Goal {
        let mut data = NewGoal::new("Read daily", target_days);
        data.category = "learning".to_string();
        Goal::new(data).unwrap()
    }

    fn mark(goal: &mut Goal, date: &str, completed: bool) {
        goal.progress
            .upsert(DailyProgress::new(parse_date(date).unwrap(), completed, None));
    }

    #[test]
    fn test_new_goal_starts_empty() {
        let goal = create_test_goal(3);
        assert!(goal.progress.is_empty());
        assert!(!goal.is_completed());
        assert_eq!(goal.priority, Priority::Medium);
    }

    #[test]
    fn test_new_goal_rejects_zero_target() {
        let err = Goal::new(NewGoal::new("Nothing", 0)).unwrap_err();
        assert_eq!(err, GoalError::InvalidTargetDays(0));
    }

    #[test]
    fn test_new_goal_accepts_blank_text_fields() {
        let goal = Goal::new(NewGoal::new("", 5)).unwrap();
        assert!(goal.title.is_empty());
        assert!(goal.description.is_empty());
        assert!(goal.category.is_empty());
    }

    #[test]
    fn test_completion_follows_log() {
        let mut goal = create_test_goal(2);
        mark(&mut goal, "2024-01-01", true);
        assert!(!goal.is_completed());
        mark(&mut goal, "2024-01-02", true);
        assert!(goal.is_completed());
        mark(&mut goal, "2024-01-02", false);
        assert!(!goal.is_completed());
    }

    #[test]
    fn test_apply_patch_merges_fields() {
        let mut goal = create_test_goal(10);
        let patch = GoalPatch {
            title: Some("Read twice daily".to_string()),
            priority: Some(Priority::High),
            ..Default::default()
        };
        goal.apply(patch).unwrap();
        assert_eq!(goal.title, "Read twice daily");
        assert_eq!(goal.priority, Priority::High);
        assert_eq!(goal.category, "learning");
        assert_eq!(goal.target_days, 10);
    }

    #[test]
    fn test_apply_invalid_patch_changes_nothing() {
        let mut goal = create_test_goal(10);
        let before = goal.clone();
        let patch = GoalPatch {
            title: Some("New title".to_string()),
            target_days: Some(0),
            ..Default::default()
        };
        assert!(goal.apply(patch).is_err());
        assert_eq!(goal, before);
    }

    #[test]
    fn test_lowering_target_completes_goal() {
        let mut goal = create_test_goal(5);
        mark(&mut goal, "2024-01-01", true);
        mark(&mut goal, "2024-01-02", true);
        goal.apply(GoalPatch { target_days: Some(2), ..Default::default() }).unwrap();
        assert!(goal.is_completed());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::Medium.to_string(), "medium");
    }

    #[test]
    fn test_serialized_goal_carries_derived_flag() {
        let mut goal = create_test_goal(1);
        mark(&mut goal, "2024-01-01", true);

        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["isCompleted"], serde_json::json!(true));
        assert_eq!(value["targetDays"], serde_json::json!(1));
        assert_eq!(value["priority"], serde_json::json!("medium"));
        assert_eq!(value["progress"][0]["date"], serde_json::json!("2024-01-01"));

        let back: Goal = serde_json::from_value(value).unwrap();
        assert_eq!(back, goal);
    }

    #[test]
    fn test_record_consistency_check() {
        let goal = create_test_goal(1);
        let mut record = GoalRecord::from(goal);
        assert!(record.is_consistent());

        record.is_completed = true;
        assert!(!record.is_consistent());

        let goal = Goal::from(record);
        assert!(!goal.is_completed());
    }
}
