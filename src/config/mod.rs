//! Engine configuration: rate table, metric status policy, savings display range

pub mod loader;

use std::collections::HashMap;
use std::path::Path;

use crate::currency::RateTable;
use crate::error::{EngineError, Result};
use crate::health::StatusPolicy;
use crate::loan::DEFAULT_SAVINGS_RANGE;

/// Container for every configurable input of the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rates: RateTable,
    pub status_policy: StatusPolicy,

    /// Clamp range for percent savings in loan comparisons
    pub savings_range: (f64, f64),
}

impl EngineConfig {
    /// Built-in illustrative configuration
    pub fn default_config() -> Self {
        Self {
            rates: RateTable::default_rates(),
            status_policy: StatusPolicy::default(),
            savings_range: DEFAULT_SAVINGS_RANGE,
        }
    }

    /// Load configuration from CSV files in the default location (data/config/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let (reference, rates) = loader::load_currency_rates(path)?;
        let settings = loader::load_engine_settings(path)?;

        let mut config = Self {
            rates: RateTable::new(&reference, rates)?,
            ..Self::default_config()
        };
        config.apply_settings(&settings)?;
        Ok(config)
    }

    /// Override fields from `key,value` settings; unknown keys are rejected
    pub fn apply_settings(&mut self, settings: &HashMap<String, String>) -> Result<()> {
        for (key, value) in settings {
            match key.as_str() {
                "status_policy" => {
                    self.status_policy = match value.to_ascii_lowercase().as_str() {
                        "derive" => StatusPolicy::Derive,
                        "strict" => StatusPolicy::Strict,
                        other => {
                            return Err(EngineError::Config(format!("unknown status_policy `{other}`")))
                        }
                    }
                }
                "savings_floor" => self.savings_range.0 = parse_number(key, value)?,
                "savings_ceiling" => self.savings_range.1 = parse_number(key, value)?,
                other => return Err(EngineError::Config(format!("unknown setting `{other}`"))),
            }
        }

        if self.savings_range.0 > self.savings_range.1 {
            return Err(EngineError::Config(format!(
                "savings_floor {} exceeds savings_ceiling {}",
                self.savings_range.0, self.savings_range.1
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EngineError::Config(format!("{key} must be a number, found `{value}`")))
}
