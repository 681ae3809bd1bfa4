//! JSON file storage implementation.
//!
//! Stores the whole goal collection as one JSON document under a root
//! directory. The directory is created on the first save.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use uplify_core::{Goal, GoalRecord};

use super::{Result, Storage};

/// File name of the goal collection document.
pub const GOALS_FILE: &str = "uplify-goals.json";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`. Nothing is touched on disk until a save.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the goal collection document.
    pub fn goals_path(&self) -> PathBuf {
        self.root.join(GOALS_FILE)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn load_goals(&self) -> Result<Vec<Goal>> {
        let Some(records) = read_json::<Vec<GoalRecord>>(&self.goals_path()).await? else {
            debug!(path = %self.goals_path().display(), "no goal document yet");
            return Ok(Vec::new());
        };

        let goals = records
            .into_iter()
            .map(|record| {
                if !record.is_consistent() {
                    warn!(
                        goal_id = %record.id,
                        stored = record.is_completed,
                        "stored completion flag disagrees with progress log, recomputing"
                    );
                }
                Goal::from(record)
            })
            .collect::<Vec<_>>();

        debug!(count = goals.len(), "goals loaded");
        Ok(goals)
    }

    async fn save_goals(&mut self, goals: &[Goal]) -> Result<()> {
        let json = serde_json::to_string_pretty(goals)?;
        fs::create_dir_all(&self.root).await?;
        write_atomic(&self.goals_path(), json.as_bytes()).await?;
        debug!(count = goals.len(), "goals saved");
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uplify_core::{DailyProgress, NewGoal, Priority};

    fn create_test_goal() -> Goal {
        let mut data = NewGoal::new("Run", 2);
        data.description = "Morning run".to_string();
        data.category = "fitness".to_string();
        data.priority = Priority::High;
        let mut goal = Goal::new(data).unwrap();
        goal.progress.upsert(DailyProgress::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            true,
            Some("5k".to_string()),
        ));
        goal
    }

    #[tokio::test]
    async fn test_load_missing_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        assert!(storage.load_goals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_created_on_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join(".uplify");
        let mut storage = JsonStorage::new(&root);

        assert!(storage.load_goals().await.unwrap().is_empty());
        assert!(!root.exists());

        storage.save_goals(&[create_test_goal()]).await.unwrap();
        assert!(storage.goals_path().is_file());
        assert_eq!(storage.load_goals().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_and_load_goals() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path());

        let goal = create_test_goal();
        storage.save_goals(&[goal.clone()]).await.unwrap();

        let loaded = storage.load_goals().await.unwrap();
        assert_eq!(loaded, vec![goal]);

        storage.save_goals(&[]).await.unwrap();
        assert!(storage.load_goals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path());
        storage.save_goals(&[create_test_goal()]).await.unwrap();

        let raw = std::fs::read_to_string(storage.goals_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let goal = &value[0];
        assert_eq!(goal["targetDays"], 2);
        assert_eq!(goal["isCompleted"], false);
        assert_eq!(goal["priority"], "high");
        assert_eq!(goal["progress"][0]["date"], "2024-05-01");
        assert_eq!(goal["progress"][0]["note"], "5k");
    }

    #[tokio::test]
    async fn test_inconsistent_flag_is_recomputed() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path());
        storage.save_goals(&[create_test_goal()]).await.unwrap();

        let path = storage.goals_path();
        let raw = std::fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value[0]["isCompleted"] = serde_json::json!(true);
        std::fs::write(&path, value.to_string()).unwrap();

        let loaded = storage.load_goals().await.unwrap();
        assert!(!loaded[0].is_completed());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        std::fs::write(storage.goals_path(), "{not json").unwrap();
        assert!(matches!(
            storage.load_goals().await,
            Err(crate::StorageError::Json(_))
        ));
    }
}
