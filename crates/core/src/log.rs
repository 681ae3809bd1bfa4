//! Daily completion log - at most one entry per calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// A single day's record for a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Whether the goal was done that day
    pub completed: bool,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailyProgress {
    /// Create a new entry.
    pub fn new(date: NaiveDate, completed: bool, note: Option<String>) -> Self {
        Self { date, completed, note }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, GoalError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| GoalError::InvalidDate(s.to_string()))
}

/// Ordered collection of daily entries, deduplicated by date.
///
/// Entries keep insertion order; a write for an existing date replaces that
/// entry in place. Deserializing a list with repeated dates keeps the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DailyProgress>", into = "Vec<DailyProgress>")]
pub struct ProgressLog {
    entries: Vec<DailyProgress>,
}

impl ProgressLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `entry.date`.
    ///
    /// The whole entry is replaced, so a missing note clears any earlier one.
    /// Returns the replaced entry, if any.
    pub fn upsert(&mut self, entry: DailyProgress) -> Option<DailyProgress> {
        match self.entries.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Entry for a given date.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyProgress> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[DailyProgress] {
        &self.entries
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, DailyProgress> {
        self.entries.iter()
    }

    /// Dates of completed entries, in insertion order.
    pub fn completed_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().filter(|e| e.completed).map(|e| e.date)
    }

    /// Number of entries with `completed = true`.
    pub fn completed_days(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no day has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<DailyProgress>> for ProgressLog {
    fn from(entries: Vec<DailyProgress>) -> Self {
        let mut log = ProgressLog::new();
        for entry in entries {
            log.upsert(entry);
        }
        log
    }
}

impl From<ProgressLog> for Vec<DailyProgress> {
    fn from(log: ProgressLog) -> Self {
        log.entries
    }
}

impl<'a> IntoIterator for &'a ProgressLog {
    type Item = &'a DailyProgress;
    type IntoIter = std::slice::Iter<'a, DailyProgress>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
