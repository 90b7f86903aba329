//! Finance Engine - Personal finance computations behind the dashboard
//!
//! This library provides:
//! - Fixed-rate loan amortization, schedules and rate comparisons
//! - Savings goal tracking with completion and time remaining
//! - Composite financial health scoring and credit score bands
//! - Currency conversion against a configurable rate table
//!
//! Every computation is synchronous and deterministic. Invalid input fails with
//! an [`EngineError`] instead of producing `NaN` or `Infinity`.

pub mod config;
pub mod currency;
pub mod error;
pub mod goals;
pub mod health;
pub mod loan;
pub mod scenario;

// Re-export commonly used types
pub use config::EngineConfig;
pub use currency::{convert, rate, CurrencyAmount, RateTable};
pub use error::{EngineError, Result};
pub use goals::{Goal, GoalId, GoalPatch, GoalProgress, GoalTracker, NewGoal};
pub use health::{label_for, score, FinancialMetric, HealthLabel, MetricStatus, StatusPolicy};
pub use loan::{amortize, compare, AmortizationResult, ComparisonResult, LoanScenario};
pub use scenario::ScenarioRunner;
