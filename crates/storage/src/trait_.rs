//! Storage trait abstraction.

use async_trait::async_trait;
use uplify_core::Goal;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage abstraction for the goal collection.
///
/// The whole collection is loaded at startup and written back as a unit.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load every goal. An empty store yields an empty list.
    async fn load_goals(&self) -> Result<Vec<Goal>>;

    /// Replace the stored collection with `goals`.
    async fn save_goals(&mut self, goals: &[Goal]) -> Result<()>;
}
