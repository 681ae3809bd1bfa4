//! Unique identifiers for Uplify entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoalId(Ulid);

impl GoalId {
    /// Generate a new GoalId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for GoalId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_id_parse_display() {
        let id = GoalId::new();
        let parsed: GoalId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_goal_id_rejects_garbage() {
        assert!("not-a-ulid".parse::<GoalId>().is_err());
    }

    #[test]
    fn test_goal_ids_are_unique() {
        assert_ne!(GoalId::new(), GoalId::new());
    }
}
