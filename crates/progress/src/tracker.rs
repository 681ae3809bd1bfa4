//! Goal tracking service.

use chrono::NaiveDate;
use tracing::debug;
use uplify_core::{
    DailyProgress, Goal, GoalError, GoalId, GoalPatch, GoalStats, NewGoal, Priority,
    ProgressSummary,
};

use crate::observer::{Mutation, MutationObserver, NoopObserver};
use crate::stats::{goal_progress, goal_stats};

/// Source of "today" for streak and summary computations.
pub type Clock = fn() -> NaiveDate;

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Owns the goal collection and applies mutations to it.
///
/// Every read is computed from the current goals; nothing is cached.
pub struct GoalTracker {
    goals: Vec<Goal>,
    observer: Box<dyn MutationObserver>,
    clock: Clock,
}

impl GoalTracker {
    /// Create a tracker over previously loaded goals.
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            goals,
            observer: Box::new(NoopObserver),
            clock: local_today,
        }
    }

    /// Set the mutation observer.
    pub fn with_observer(mut self, observer: Box<dyn MutationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Set the clock used for "today".
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Today's date according to the tracker's clock.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// All goals, in creation order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Consume the tracker, returning its goals.
    pub fn into_goals(self) -> Vec<Goal> {
        self.goals
    }

    /// Look up a goal.
    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Goals in a category.
    pub fn goals_by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Goal> + 'a {
        self.goals.iter().filter(move |g| g.category == category)
    }

    /// Goals with a given priority.
    pub fn goals_by_priority(&self, priority: Priority) -> impl Iterator<Item = &Goal> + '_ {
        self.goals.iter().filter(move |g| g.priority == priority)
    }

    /// Create a goal with a fresh id and an empty log.
    pub fn add_goal(&mut self, data: NewGoal) -> Result<Goal, GoalError> {
        let goal = Goal::new(data)?;
        debug!(goal_id = %goal.id, title = %goal.title, target_days = goal.target_days, "goal added");
        self.goals.push(goal.clone());
        self.notify(Mutation::GoalAdded(goal.id));
        Ok(goal)
    }

    /// Merge fields into an existing goal.
    ///
    /// Returns `Ok(false)` when the goal does not exist.
    pub fn update_goal(&mut self, id: GoalId, patch: GoalPatch) -> Result<bool, GoalError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        goal.apply(patch)?;
        debug!(goal_id = %id, completed = goal.is_completed(), "goal updated");
        self.notify(Mutation::GoalUpdated(id));
        Ok(true)
    }

    /// Remove a goal and its log. Returns whether it existed.
    pub fn delete_goal(&mut self, id: GoalId) -> bool {
        let Some(index) = self.goals.iter().position(|g| g.id == id) else {
            return false;
        };
        self.goals.remove(index);
        debug!(goal_id = %id, "goal deleted");
        self.notify(Mutation::GoalDeleted(id));
        true
    }

    /// Write the entry for `date`, replacing any existing one.
    ///
    /// Returns `false` without touching anything when the goal does not exist.
    pub fn mark_day_complete(
        &mut self,
        id: GoalId,
        date: NaiveDate,
        completed: bool,
        note: Option<String>,
    ) -> bool {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return false;
        };
        let replaced = goal.progress.upsert(DailyProgress::new(date, completed, note));
        debug!(
            goal_id = %id,
            %date,
            completed,
            replaced = replaced.is_some(),
            goal_completed = goal.is_completed(),
            "day marked"
        );
        self.notify(Mutation::DayMarked { goal_id: id, date, completed });
        true
    }

    /// Progress summary for a goal, or `None` if it does not exist.
    pub fn goal_progress(&self, id: GoalId) -> Option<ProgressSummary> {
        self.goal(id).map(|g| goal_progress(g, self.today()))
    }

    /// Aggregate statistics over all goals.
    pub fn stats(&self) -> GoalStats {
        goal_stats(&self.goals, self.today())
    }

    fn notify(&self, mutation: Mutation) {
        self.observer.on_mutation(&mutation, &self.goals);
    }
}
