//! Scenario runner for batch loan calculations
//!
//! Holds one engine configuration and runs many loan scenarios and rate
//! comparisons against it.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::currency;
use crate::error::Result;
use crate::health::{self, FinancialMetric, HealthReport};
use crate::loan::{
    amortization_schedule, amortize_scenario, compare_scenarios, AmortizationResult,
    AmortizationSchedule, ComparisonResult, LoanScenario,
};

/// One row of a rate comparison grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub alternative_rate_percent: f64,
    pub comparison: ComparisonResult,
}

/// Pre-configured runner for repeated calculations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Compare a card balance against several refinance offers
/// let grid = runner.compare_grid(5000.0, 24, 18.0, &[6.0, 9.0, 12.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Create runner with the built-in configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default_config(),
        }
    }

    /// Create runner by loading configuration from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            config: EngineConfig::from_csv()?,
        })
    }

    /// Create runner from a specific configuration directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            config: EngineConfig::from_csv_path(path)?,
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Amortize a single scenario
    pub fn run(&self, scenario: &LoanScenario) -> Result<AmortizationResult> {
        scenario.validate()?;
        amortize_scenario(scenario)
    }

    /// Amortize several scenarios, stopping at the first invalid one
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Result<Vec<AmortizationResult>> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }

    /// Month-by-month schedule for a scenario
    pub fn schedule(&self, scenario: &LoanScenario) -> Result<AmortizationSchedule> {
        amortization_schedule(scenario)
    }

    /// Compare two rates using the configured savings range
    pub fn compare(
        &self,
        principal: f64,
        term_months: u32,
        baseline_rate_percent: f64,
        alternative_rate_percent: f64,
    ) -> Result<ComparisonResult> {
        let baseline = LoanScenario::new(principal, baseline_rate_percent, term_months)?;
        let alternative = baseline.with_rate(alternative_rate_percent);
        alternative.validate()?;
        compare_scenarios(&baseline, &alternative, self.config.savings_range)
    }

    /// Compare one baseline rate against each alternative in turn
    pub fn compare_grid(
        &self,
        principal: f64,
        term_months: u32,
        baseline_rate_percent: f64,
        alternative_rates: &[f64],
    ) -> Result<Vec<GridRow>> {
        alternative_rates
            .iter()
            .map(|&rate| {
                Ok(GridRow {
                    alternative_rate_percent: rate,
                    comparison: self.compare(principal, term_months, baseline_rate_percent, rate)?,
                })
            })
            .collect()
    }

    /// Convert with the configured rate table
    pub fn convert(&self, amount: f64, from_code: &str, to_code: &str) -> Result<f64> {
        currency::convert(amount, from_code, to_code, &self.config.rates)
    }

    /// Health report using the configured status policy
    pub fn health_report(&self, metrics: &[FinancialMetric]) -> Result<HealthReport> {
        health::health_report(metrics, self.config.status_policy)
    }

    /// Get reference to the configuration for inspection
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get mutable reference to the configuration for customization
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
