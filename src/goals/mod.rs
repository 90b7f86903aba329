//! Savings goals: creation, edits, completion and time remaining

mod clock;
mod data;
mod tracker;

pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, TimestampIds};
pub use data::{
    progress_of, time_remaining, Goal, GoalId, GoalPatch, GoalProgress, GoalsSummary, NewGoal,
    TimeRemaining,
};
pub use tracker::GoalTracker;
