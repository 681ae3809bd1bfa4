//! Validation errors for goal data.

/// Errors raised when goal input fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalError {
    /// A goal needs at least one target day
    #[error("target days must be positive, got {0}")]
    InvalidTargetDays(u32),

    /// A progress date did not parse as `YYYY-MM-DD`
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Priority string is not one of low, medium, high
    #[error("invalid priority '{0}', expected low, medium or high")]
    InvalidPriority(String),
}
