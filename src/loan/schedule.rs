//! Month-by-month amortization schedule

use serde::{Deserialize, Serialize};

use super::amortization::{amortize_scenario, AmortizationResult, LoanScenario};
use crate::error::{EngineError, Result};

/// Longest schedule that will be materialized row by row (100 years)
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// A single installment of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Installment number (1-indexed)
    pub month: u32,

    /// Amount paid this month
    pub payment: f64,

    /// Interest portion of the payment
    pub interest: f64,

    /// Principal portion of the payment
    pub principal: f64,

    /// Outstanding balance after this payment
    pub remaining_balance: f64,
}

/// Full schedule for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub scenario: LoanScenario,
    pub summary: AmortizationResult,
    pub rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    /// Sum of the interest column
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Sum of the principal column
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// First month in which cumulative principal reaches `fraction` of the loan
    pub fn month_reaching(&self, fraction: f64) -> Option<u32> {
        let target = self.scenario.principal * fraction;
        let mut repaid = 0.0;
        for row in &self.rows {
            repaid += row.principal;
            if repaid >= target - 1e-9 {
                return Some(row.month);
            }
        }
        None
    }
}

/// Build the installment-by-installment schedule for a loan
///
/// Interest each month is `balance * c`. The final row pays off whatever
/// balance is left so the loan closes at exactly zero. Terms beyond
/// [`MAX_SCHEDULE_MONTHS`] are rejected; [`amortize_scenario`] still covers them.
pub fn amortization_schedule(scenario: &LoanScenario) -> Result<AmortizationSchedule> {
    scenario.validate()?;
    if scenario.term_months > MAX_SCHEDULE_MONTHS {
        return Err(EngineError::invalid(
            "term_months",
            format!("schedules are limited to {MAX_SCHEDULE_MONTHS} months"),
        ));
    }

    let summary = amortize_scenario(scenario)?;
    let c = scenario.monthly_rate();
    let mut balance = scenario.principal;
    let mut rows = Vec::with_capacity(scenario.term_months as usize);

    for month in 1..=scenario.term_months {
        let interest = balance * c;
        let principal = if month == scenario.term_months {
            balance
        } else {
            (summary.monthly_payment - interest).min(balance)
        };
        balance -= principal;

        rows.push(ScheduleRow {
            month,
            payment: interest + principal,
            interest,
            principal,
            remaining_balance: balance.max(0.0),
        });
    }

    Ok(AmortizationSchedule {
        scenario: *scenario,
        summary,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_schedule_closes_at_zero() {
        let scenario = LoanScenario::new(5000.0, 9.0, 24).unwrap();
        let schedule = amortization_schedule(&scenario).unwrap();

        assert_eq!(schedule.rows.len(), 24);
        assert_eq!(schedule.rows.last().unwrap().remaining_balance, 0.0);
        assert_abs_diff_eq!(schedule.total_principal(), 5000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_interest_matches_summary() {
        let scenario = LoanScenario::new(25_000.0, 6.5, 60).unwrap();
        let schedule = amortization_schedule(&scenario).unwrap();

        assert_abs_diff_eq!(
            schedule.total_interest(),
            schedule.summary.total_interest,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_first_row_split() {
        // Month 1 interest on $5,000 at 0.75% per month
        let scenario = LoanScenario::new(5000.0, 9.0, 24).unwrap();
        let schedule = amortization_schedule(&scenario).unwrap();
        let first = schedule.rows[0];

        assert_abs_diff_eq!(first.interest, 37.5, epsilon = 1e-9);
        assert_abs_diff_eq!(first.principal, first.payment - 37.5, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_portion_declines() {
        let scenario = LoanScenario::new(12_000.0, 12.0, 36).unwrap();
        let schedule = amortization_schedule(&scenario).unwrap();

        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest <= pair[0].interest);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let scenario = LoanScenario::new(1000.0, 0.0, 4).unwrap();
        let schedule = amortization_schedule(&scenario).unwrap();

        assert!(schedule.rows.iter().all(|r| r.interest == 0.0));
        assert!(schedule.rows.iter().all(|r| (r.payment - 250.0).abs() < 1e-9));
        assert_eq!(schedule.month_reaching(0.5), Some(2));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = LoanScenario {
            principal: 1000.0,
            annual_rate_percent: 5.0,
            term_months: 0,
        };
        assert!(amortization_schedule(&scenario).is_err());
    }

    #[test]
    fn test_oversized_term_rejected() {
        let scenario = LoanScenario::new(1000.0, 5.0, 3_000_000_000).unwrap();
        assert!(matches!(
            amortization_schedule(&scenario),
            Err(EngineError::InvalidInput { field: "term_months", .. })
        ));

        let longest = LoanScenario::new(1000.0, 5.0, MAX_SCHEDULE_MONTHS).unwrap();
        let schedule = amortization_schedule(&longest).unwrap();
        assert_eq!(schedule.rows.len(), MAX_SCHEDULE_MONTHS as usize);
        assert!(schedule.rows.iter().all(|r| r.interest >= 0.0 && r.principal >= 0.0));
    }
}
