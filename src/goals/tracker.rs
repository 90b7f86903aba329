//! In-memory goal collection
//!
//! The tracker owns every goal it creates. Insertion order is display order,
//! and edits keep a goal in place.

use log::{debug, info, warn};

use super::clock::{Clock, IdGenerator, SequentialIds, SystemClock};
use super::data::{
    progress_of, time_remaining, Goal, GoalId, GoalPatch, GoalProgress, GoalsSummary, NewGoal,
    TimeRemaining,
};
use crate::error::{ensure_non_negative, ensure_positive, EngineError, Result};

/// Owns an ordered collection of savings goals
pub struct GoalTracker {
    goals: Vec<Goal>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl GoalTracker {
    /// Tracker using the system clock and sequential ids
    pub fn new() -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(SequentialIds::default()))
    }

    /// Tracker with caller-supplied clock and id generator
    pub fn with_sources(clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            goals: Vec::new(),
            clock,
            ids,
        }
    }

    /// Validate and append a new goal
    ///
    /// # Errors
    /// `InvalidInput` on an empty name, a non-positive target or a negative balance.
    pub fn add_goal(&mut self, input: NewGoal) -> Result<Goal> {
        if let Err(err) = input.validate() {
            warn!("rejected new goal: {err}");
            return Err(err);
        }

        let goal = input.into_goal(self.ids.next_id());
        info!("added {} \"{}\" with target {:.2}", goal.id, goal.name, goal.target_amount);
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Apply a partial update to an existing goal
    pub fn update_goal(&mut self, id: GoalId, patch: &GoalPatch) -> Result<Goal> {
        let slot = self.position(id)?;
        let updated = patch.apply_to(&self.goals[slot])?;
        self.goals[slot] = updated.clone();
        info!("updated {id}");
        Ok(updated)
    }

    /// Remove a goal
    ///
    /// Deleting an id that is not present is an error, not a no-op.
    pub fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        let slot = self.position(id)?;
        let removed = self.goals.remove(slot);
        info!("deleted {} \"{}\"", removed.id, removed.name);
        Ok(())
    }

    /// Add money to a goal's saved amount
    ///
    /// The goal is left untouched when the new total would not be finite.
    pub fn contribute(&mut self, id: GoalId, amount: f64) -> Result<Goal> {
        ensure_positive("amount", amount)?;
        let slot = self.position(id)?;
        let goal = &mut self.goals[slot];
        let total = goal.current_amount + amount;
        if !total.is_finite() {
            warn!("contribution of {amount} to {} overflows", goal.id);
        }
        goal.current_amount = ensure_non_negative("current_amount", total)?;
        debug!("{} now at {:.2} of {:.2}", goal.id, goal.current_amount, goal.target_amount);
        Ok(goal.clone())
    }

    /// Goals in display order
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Completion of a goal
    pub fn progress_of(&self, goal: &Goal) -> GoalProgress {
        progress_of(goal)
    }

    /// Time and money left for a goal, measured from the tracker's clock
    pub fn time_remaining(&self, goal: &Goal) -> TimeRemaining {
        time_remaining(goal, self.clock.today())
    }

    /// Aggregate totals across every goal
    pub fn summary(&self) -> GoalsSummary {
        let total_target: f64 = self.goals.iter().map(|g| g.target_amount).sum();
        let total_saved: f64 = self.goals.iter().map(|g| g.current_amount).sum();
        let completed_count = self
            .goals
            .iter()
            .filter(|g| progress_of(g).is_complete)
            .count();

        let overall_percent = if total_target > 0.0 {
            (total_saved / total_target * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        GoalsSummary {
            goal_count: self.goals.len(),
            completed_count,
            total_target,
            total_saved,
            overall_percent,
        }
    }

    fn position(&self, id: GoalId) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| EngineError::NotFound { id: id.to_string() })
    }
}

impl Default for GoalTracker {
    fn default() -> Self {
        Self::new()
    }
}
