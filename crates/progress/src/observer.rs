//! Mutation hooks.
//!
//! The tracker notifies an observer after every successful mutation so the
//! host can decide when to persist (immediately, batched, on exit).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use uplify_core::{Goal, GoalId};

/// A mutation applied to the goal collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A goal was created
    GoalAdded(GoalId),
    /// Descriptive fields or target changed
    GoalUpdated(GoalId),
    /// A goal and its log were removed
    GoalDeleted(GoalId),
    /// A day was written to a goal's log
    DayMarked {
        /// Goal whose log changed
        goal_id: GoalId,
        /// Day written
        date: NaiveDate,
        /// Completed flag written
        completed: bool,
    },
}

/// Receives the full goal collection after each mutation.
pub trait MutationObserver: Send + Sync {
    /// Called once per successful mutation, never for no-ops.
    fn on_mutation(&self, mutation: &Mutation, goals: &[Goal]);
}

/// Observer that ignores every mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MutationObserver for NoopObserver {
    fn on_mutation(&self, _mutation: &Mutation, _goals: &[Goal]) {}
}

/// Dirty flag shared between the tracker and whoever persists its goals.
///
/// Clones share state. The persisting side checks [`PendingChanges::is_pending`]
/// and calls [`PendingChanges::clear`] after a successful save.
#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    pending: Arc<AtomicBool>,
    count: Arc<AtomicUsize>,
}

impl PendingChanges {
    /// Create a clean flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any mutation happened since the last clear.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Mutations seen since the last clear.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Reset after persisting.
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
        self.count.store(0, Ordering::Release);
    }
}

impl MutationObserver for PendingChanges {
    fn on_mutation(&self, _mutation: &Mutation, _goals: &[Goal]) {
        self.count.fetch_add(1, Ordering::AcqRel);
        self.pending.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_changes_shared_between_clones() {
        let pending = PendingChanges::new();
        let handle = pending.clone();
        assert!(!handle.is_pending());

        pending.on_mutation(&Mutation::GoalDeleted(GoalId::new()), &[]);
        pending.on_mutation(&Mutation::GoalDeleted(GoalId::new()), &[]);
        assert!(handle.is_pending());
        assert_eq!(handle.count(), 2);

        handle.clear();
        assert!(!pending.is_pending());
        assert_eq!(pending.count(), 0);
    }
}
