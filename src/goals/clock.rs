//! Injectable time and id sources for the goal tracker

use chrono::{Local, NaiveDate, Utc};

use super::data::GoalId;

/// Source of "today" for time-remaining calculations
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Produces goal ids that never repeat within one tracker
pub trait IdGenerator {
    fn next_id(&mut self) -> GoalId;
}

/// 1, 2, 3, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> GoalId {
        self.last += 1;
        GoalId(self.last)
    }
}

/// Millisecond timestamps, bumped forward when two ids land in the same millisecond
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: u64,
}

impl TimestampIds {
    fn next_after(&mut self, now_millis: u64) -> GoalId {
        self.last = now_millis.max(self.last + 1);
        GoalId(self.last)
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> GoalId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.next_after(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), GoalId(1));
        assert_eq!(ids.next_id(), GoalId(2));

        let mut resumed = SequentialIds::starting_after(10);
        assert_eq!(resumed.next_id(), GoalId(11));
    }

    #[test]
    fn test_timestamp_ids_are_strictly_increasing() {
        let mut ids = TimestampIds::default();
        let a = ids.next_after(1_000);
        let b = ids.next_after(1_000);
        let c = ids.next_after(999);
        let d = ids.next_after(5_000);

        assert_eq!(a, GoalId(1_000));
        assert_eq!(b, GoalId(1_001));
        assert_eq!(c, GoalId(1_002));
        assert_eq!(d, GoalId(5_000));

        let live = ids.next_id();
        assert!(live > d);
    }

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }
}
