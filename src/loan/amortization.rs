//! Fixed-rate installment math
//!
//! Uses the standard annuity formula with a monthly rate derived from the
//! annual percentage: `c = annual_rate_percent / 100 / 12`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, EngineError, Result};

/// Months in a year, used to convert the quoted annual rate
const MONTHS_PER_YEAR: f64 = 12.0;

/// Immutable loan inputs for one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    /// Amount borrowed
    pub principal: f64,

    /// Quoted annual rate in percent (9.0 means 9%)
    pub annual_rate_percent: f64,

    /// Number of monthly installments
    pub term_months: u32,
}

impl LoanScenario {
    /// Build a validated scenario
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<Self> {
        let scenario = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<()> {
        ensure_positive("principal", self.principal)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        if self.term_months == 0 {
            return Err(EngineError::invalid("term_months", "must be greater than zero"));
        }
        Ok(())
    }

    /// Periodic (monthly) interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR
    }

    /// Same loan at a different rate
    pub fn with_rate(&self, annual_rate_percent: f64) -> Self {
        Self {
            annual_rate_percent,
            ..*self
        }
    }
}

/// Payment and aggregate cost of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Compute the level monthly payment and totals for a loan
///
/// # Arguments
/// * `principal` - Amount borrowed, must be > 0
/// * `annual_rate_percent` - Annual rate in percent, must be >= 0
/// * `term_months` - Number of installments, must be > 0
///
/// # Errors
/// * `InvalidInput` when any argument is outside its domain
/// * `DegenerateResult` when the payment overflows
pub fn amortize(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<AmortizationResult> {
    let scenario = LoanScenario::new(principal, annual_rate_percent, term_months)?;
    amortize_scenario(&scenario)
}

/// Struct form of [`amortize`] for an already validated scenario
///
/// # Errors
/// `DegenerateResult` when the payment or totals leave the finite range,
/// e.g. a rate so large that the payment overflows.
pub fn amortize_scenario(scenario: &LoanScenario) -> Result<AmortizationResult> {
    let monthly_payment = level_payment(scenario);
    let total_paid = monthly_payment * scenario.term_months as f64;

    if !(monthly_payment.is_finite() && monthly_payment > 0.0 && total_paid.is_finite()) {
        warn!(
            "no finite payment for {} at {}% over {} months",
            scenario.principal, scenario.annual_rate_percent, scenario.term_months
        );
        return Err(EngineError::DegenerateResult {
            reason: format!("monthly payment {monthly_payment} is not a finite positive amount"),
        });
    }

    // Rounding in payment * n can land a hair under the principal
    let total_paid = total_paid.max(scenario.principal);
    let result = AmortizationResult {
        monthly_payment,
        total_paid,
        total_interest: total_paid - scenario.principal,
    };

    debug!(
        "amortized {:.2} at {}% over {} months: payment {:.4}",
        scenario.principal, scenario.annual_rate_percent, scenario.term_months, result.monthly_payment
    );

    Ok(result)
}

/// Level installment for the scenario
///
/// Evaluates `P * c / (1 - (1 + c)^-n)` through `ln_1p`/`exp_m1` so that
/// tiny rates keep their precision and long terms cannot overflow.
pub(crate) fn level_payment(scenario: &LoanScenario) -> f64 {
    let n = scenario.term_months as f64;
    let c = scenario.monthly_rate();
    let straight_line = scenario.principal / n;

    // Zero interest: straight-line repayment
    if c == 0.0 {
        return straight_line;
    }

    // 1 - (1 + c)^-n
    let discount = -(-n * c.ln_1p()).exp_m1();
    let payment = scenario.principal * c / discount;

    // Any positive rate costs at least the straight-line installment
    if payment.is_nan() {
        payment
    } else {
        payment.max(straight_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reference_loan() {
        // $5,000 at 9% for 24 months
        let result = amortize(5000.0, 9.0, 24).unwrap();

        assert_abs_diff_eq!(result.monthly_payment, 228.42, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_paid, 5482.17, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_interest, 482.17, epsilon = 0.01);
    }

    #[test]
    fn test_monthly_rate() {
        let scenario = LoanScenario::new(5000.0, 9.0, 24).unwrap();
        assert!((scenario.monthly_rate() - 0.0075).abs() < 1e-12);
    }

    #[test]
    fn test_zero_interest_is_straight_line() {
        let result = amortize(1200.0, 0.0, 12).unwrap();
        assert_eq!(result.monthly_payment, 100.0);
        assert_eq!(result.total_paid, 1200.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_single_installment() {
        // One month at 12%: principal plus one month of 1% interest
        let result = amortize(1000.0, 12.0, 1).unwrap();
        assert_abs_diff_eq!(result.monthly_payment, 1010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(matches!(
            amortize(5000.0, 9.0, 0),
            Err(EngineError::InvalidInput { field: "term_months", .. })
        ));
        assert!(matches!(
            amortize(0.0, 9.0, 24),
            Err(EngineError::InvalidInput { field: "principal", .. })
        ));
        assert!(amortize(5000.0, -1.0, 24).is_err());
        assert!(amortize(f64::NAN, 9.0, 24).is_err());
    }

    fn assert_sane(result: &AmortizationResult, principal: f64, term_months: u32) {
        assert!(result.monthly_payment.is_finite());
        assert!(result.total_paid.is_finite());
        assert!(result.total_interest >= 0.0);
        assert!(result.monthly_payment >= principal / term_months as f64);
    }

    #[test]
    fn test_sub_basis_point_rates_match_straight_line() {
        for rate in [1e-12, 1e-17] {
            let result = amortize(1000.0, rate, 12).unwrap();
            assert_sane(&result, 1000.0, 12);
            assert_abs_diff_eq!(result.monthly_payment, 1000.0 / 12.0, epsilon = 1e-9);
            assert_abs_diff_eq!(result.total_interest, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_very_long_terms_pay_interest_only() {
        // (1 + c)^-n vanishes, leaving the payment at principal * c
        for term in [u32::MAX, 3_000_000_000] {
            let result = amortize(1000.0, 5.0, term).unwrap();
            assert_sane(&result, 1000.0, term);
            assert_relative_eq!(result.monthly_payment, 1000.0 * 5.0 / 1200.0, max_relative = 1e-12);
        }

        let result = amortize(1000.0, 30.0, 200_000).unwrap();
        assert_sane(&result, 1000.0, 200_000);
        assert_relative_eq!(result.monthly_payment, 25.0, max_relative = 1e-12);
    }

    #[test]
    fn test_overflowing_payment_is_degenerate() {
        assert!(matches!(
            amortize(1e308, 1e300, 12),
            Err(EngineError::DegenerateResult { .. })
        ));
    }

    #[test]
    fn test_with_rate_keeps_principal_and_term() {
        let base = LoanScenario::new(10_000.0, 5.0, 60).unwrap();
        let alt = base.with_rate(7.5);
        assert_eq!(alt.principal, 10_000.0);
        assert_eq!(alt.term_months, 60);
        assert_eq!(alt.annual_rate_percent, 7.5);
    }
}
