//! Exchange rate tables anchored to a reference currency
//!
//! Every rate is "units of this currency per one unit of the reference", so
//! the reference itself always maps to 1. The built-in table is illustrative,
//! not market data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Reference currency of the built-in table
pub const DEFAULT_REFERENCE_CURRENCY: &str = "USD";

/// Mapping from currency code to rate against the reference currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    reference: String,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Build a validated table
    ///
    /// The reference is added with rate 1 when missing. Codes are upper-cased.
    ///
    /// # Errors
    /// `InvalidInput` for an empty code, a rate that is not finite and > 0, or a
    /// reference entry other than 1. `Config` when a code appears twice.
    pub fn new<I, S>(reference: &str, rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let reference = normalize_code(reference)?;
        let mut table = BTreeMap::new();

        for (code, rate) in rates {
            let code = normalize_code(code.as_ref())?;
            if !rate.is_finite() || rate <= 0.0 {
                return Err(EngineError::invalid(
                    "rate",
                    format!("{code} rate {rate} must be a positive finite number"),
                ));
            }
            if let Some(previous) = table.insert(code.clone(), rate) {
                return Err(EngineError::Config(format!(
                    "duplicate currency code {code} (rates {previous} and {rate})"
                )));
            }
        }

        match table.get(&reference) {
            Some(&rate) if (rate - 1.0).abs() > 1e-12 => {
                return Err(EngineError::invalid(
                    "rate",
                    format!("reference currency {reference} must have rate 1, found {rate}"),
                ));
            }
            Some(_) => {}
            None => {
                table.insert(reference.clone(), 1.0);
            }
        }

        Ok(Self {
            reference,
            rates: table,
        })
    }

    /// Illustrative USD-anchored rates used by the dashboard
    pub fn default_rates() -> Self {
        let rates = BTreeMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.92),
            ("GBP".to_string(), 0.79),
            ("JPY".to_string(), 149.50),
            ("CAD".to_string(), 1.36),
            ("AUD".to_string(), 1.52),
            ("CHF".to_string(), 0.88),
            ("CNY".to_string(), 7.24),
            ("INR".to_string(), 83.12),
            ("MXN".to_string(), 17.05),
        ]);
        Self {
            reference: DEFAULT_REFERENCE_CURRENCY.to_string(),
            rates,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Rate for `code` against the reference
    pub fn get(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| EngineError::UnknownCurrency {
                code: code.to_string(),
            })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }

    /// Supported codes in alphabetical order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::default_rates()
    }
}

fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(EngineError::invalid("currency_code", "must not be empty"));
    }
    Ok(code.to_ascii_uppercase())
}
