//! Savings goal records and the values derived from them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_non_negative, ensure_positive, EngineError, Result};

/// Identifier assigned by the tracker when a goal is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal-{}", self.0)
    }
}

/// A user-defined savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    /// Display name, never empty
    pub name: String,

    /// Amount to reach, always > 0
    pub target_amount: f64,

    /// Amount saved so far, always >= 0
    pub current_amount: f64,

    /// Date the target should be reached by
    pub deadline: NaiveDate,

    /// Free-form color label used by the dashboard
    pub color_tag: String,
}

/// Fields supplied when creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub color_tag: String,
}

impl NewGoal {
    pub(crate) fn validate(&self) -> Result<()> {
        validate_fields(&self.name, self.target_amount, self.current_amount)
    }

    pub(crate) fn into_goal(self, id: GoalId) -> Goal {
        Goal {
            id,
            name: self.name.trim().to_string(),
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline,
            color_tag: self.color_tag,
        }
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub color_tag: Option<String>,
}

impl GoalPatch {
    /// Produce the updated goal without touching the original
    pub(crate) fn apply_to(&self, goal: &Goal) -> Result<Goal> {
        let mut updated = goal.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(target) = self.target_amount {
            updated.target_amount = target;
        }
        if let Some(current) = self.current_amount {
            updated.current_amount = current;
        }
        if let Some(deadline) = self.deadline {
            updated.deadline = deadline;
        }
        if let Some(color) = &self.color_tag {
            updated.color_tag = color.clone();
        }
        validate_fields(&updated.name, updated.target_amount, updated.current_amount)?;
        Ok(updated)
    }
}

fn validate_fields(name: &str, target_amount: f64, current_amount: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EngineError::invalid("name", "must not be empty"));
    }
    ensure_positive("target_amount", target_amount)?;
    ensure_non_negative("current_amount", current_amount)?;
    Ok(())
}

/// Completion state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Rounded completion, always within 0..=100
    pub percent_complete: u8,
    pub is_complete: bool,
}

/// Compute completion for a goal
///
/// Over-funded goals report 100, including ratios that overflow to infinity.
pub fn progress_of(goal: &Goal) -> GoalProgress {
    let ratio = goal.current_amount / goal.target_amount * 100.0;
    let percent = if ratio.is_nan() {
        0.0
    } else {
        ratio.round().clamp(0.0, 100.0)
    };

    GoalProgress {
        percent_complete: percent as u8,
        is_complete: goal.current_amount >= goal.target_amount,
    }
}

/// How much time and money is left before the deadline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRemaining {
    /// Calendar days until the deadline (negative once it has passed)
    pub days_remaining: i64,

    /// Whole calendar months until the deadline, never negative
    pub months_remaining: u32,

    /// Deadline passed without the goal being complete
    pub is_overdue: bool,

    /// Target minus saved, never negative
    pub remaining_amount: f64,

    /// Even monthly amount that would close the gap by the deadline
    pub required_monthly_contribution: f64,
}

/// Whole months from `from` to `to`, counting a month only once its day is reached
pub(crate) fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    use chrono::Datelike;

    if to <= from {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Time and money left for `goal` as seen on `today`
pub fn time_remaining(goal: &Goal, today: NaiveDate) -> TimeRemaining {
    let days_remaining = (goal.deadline - today).num_days();
    let months_remaining = whole_months_between(today, goal.deadline);
    let remaining_amount = (goal.target_amount - goal.current_amount).max(0.0);
    let is_complete = remaining_amount == 0.0;

    let required_monthly_contribution = if is_complete {
        0.0
    } else {
        // Anything due within the current month counts as one installment
        remaining_amount / months_remaining.max(1) as f64
    };

    TimeRemaining {
        days_remaining,
        months_remaining,
        is_overdue: days_remaining < 0 && !is_complete,
        remaining_amount,
        required_monthly_contribution,
    }
}

/// Totals across every goal in a tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalsSummary {
    pub goal_count: usize,
    pub completed_count: usize,
    pub total_target: f64,
    pub total_saved: f64,

    /// Saved over target across all goals, clamped to 0..=100
    pub overall_percent: u8,
}
