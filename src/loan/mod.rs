//! Loan calculations: level-payment amortization and rate comparison

mod amortization;
mod comparison;
mod schedule;

pub use amortization::{amortize, amortize_scenario, AmortizationResult, LoanScenario};
pub use comparison::{compare, compare_within, ComparisonResult, DEFAULT_SAVINGS_RANGE};
pub(crate) use comparison::compare_scenarios;
pub use schedule::{amortization_schedule, AmortizationSchedule, ScheduleRow, MAX_SCHEDULE_MONTHS};
