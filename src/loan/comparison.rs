//! Side-by-side comparison of one loan under two rates

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::amortization::{amortize_scenario, AmortizationResult, LoanScenario};
use crate::error::{EngineError, Result};

/// Display range applied to percent savings when none is configured
pub const DEFAULT_SAVINGS_RANGE: (f64, f64) = (0.0, 100.0);

/// Baseline versus alternative rate for the same principal and term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline: AmortizationResult,
    pub alternative: AmortizationResult,

    /// Baseline payment minus alternative payment (negative when the alternative costs more)
    pub absolute_monthly_savings: f64,

    /// Monthly savings over the whole term
    pub total_savings: f64,

    /// Difference in total interest between the two scenarios
    pub interest_savings: f64,

    /// Monthly savings as a share of the baseline payment, clamped to the display range
    pub percent_savings: f64,
}

/// Compare a loan at `baseline_rate_percent` against `alternative_rate_percent`
///
/// # Errors
/// * `InvalidInput` for a non-positive principal or term, or a negative rate
/// * `DegenerateResult` if either payment is not a finite positive amount
pub fn compare(
    principal: f64,
    term_months: u32,
    baseline_rate_percent: f64,
    alternative_rate_percent: f64,
) -> Result<ComparisonResult> {
    compare_within(
        principal,
        term_months,
        baseline_rate_percent,
        alternative_rate_percent,
        DEFAULT_SAVINGS_RANGE,
    )
}

/// [`compare`] with an explicit clamp range for `percent_savings`
///
/// The range must satisfy `floor <= ceiling` with neither bound NaN.
pub fn compare_within(
    principal: f64,
    term_months: u32,
    baseline_rate_percent: f64,
    alternative_rate_percent: f64,
    savings_range: (f64, f64),
) -> Result<ComparisonResult> {
    let baseline = LoanScenario::new(principal, baseline_rate_percent, term_months)?;
    let alternative = LoanScenario::new(principal, alternative_rate_percent, term_months)?;
    compare_scenarios(&baseline, &alternative, savings_range)
}

/// Compare two validated scenarios sharing principal and term
pub(crate) fn compare_scenarios(
    baseline: &LoanScenario,
    alternative: &LoanScenario,
    (floor, ceiling): (f64, f64),
) -> Result<ComparisonResult> {
    if !(floor <= ceiling) {
        return Err(EngineError::invalid(
            "savings_range",
            format!("floor {floor} must not exceed ceiling {ceiling}"),
        ));
    }

    let base = amortize_scenario(baseline)?;
    let alt = amortize_scenario(alternative)?;

    // amortize_scenario already refuses these; the division below relies on it
    if !(base.monthly_payment.is_finite() && base.monthly_payment > 0.0) {
        warn!("baseline payment is {}; percent savings is undefined", base.monthly_payment);
        return Err(EngineError::DegenerateResult {
            reason: "baseline monthly payment is not positive".to_string(),
        });
    }

    let absolute_monthly_savings = base.monthly_payment - alt.monthly_payment;
    let raw_percent = absolute_monthly_savings / base.monthly_payment * 100.0;
    let percent_savings = raw_percent.clamp(floor, ceiling);
    if percent_savings != raw_percent {
        debug!("percent savings {raw_percent:.4} clamped to {percent_savings:.4}");
    }

    Ok(ComparisonResult {
        baseline: base,
        alternative: alt,
        absolute_monthly_savings,
        total_savings: absolute_monthly_savings * baseline.term_months as f64,
        interest_savings: base.total_interest - alt.total_interest,
        percent_savings,
    })
}
