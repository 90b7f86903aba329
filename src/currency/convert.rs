//! Conversion through the reference currency

use log::debug;
use serde::{Deserialize, Serialize};

use super::rates::RateTable;
use crate::error::{EngineError, Result};

/// An amount tagged with its currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub value: f64,
    pub currency_code: String,
}

impl CurrencyAmount {
    pub fn new(value: f64, currency_code: impl Into<String>) -> Self {
        Self {
            value,
            currency_code: currency_code.into(),
        }
    }
}

/// Convert `amount` from one currency to another
///
/// The amount is first expressed in the reference currency
/// (`amount / rate[from]`), then in the target (`* rate[to]`). Either step is
/// the identity when its side is the reference.
///
/// # Errors
/// * `UnknownCurrency` if either code is missing from `table`
/// * `InvalidInput` if `amount` is not finite
/// * `DegenerateResult` if the converted amount overflows
pub fn convert(amount: f64, from_code: &str, to_code: &str, table: &RateTable) -> Result<f64> {
    if !amount.is_finite() {
        return Err(EngineError::invalid("amount", format!("{amount} is not a finite number")));
    }

    let from_rate = table.get(from_code)?;
    let to_rate = table.get(to_code)?;

    let in_reference = if is_reference(from_code, table) {
        amount
    } else {
        amount / from_rate
    };
    let converted = if is_reference(to_code, table) {
        in_reference
    } else {
        in_reference * to_rate
    };

    if !converted.is_finite() {
        return Err(EngineError::DegenerateResult {
            reason: format!("{amount} {from_code} does not fit in {to_code}"),
        });
    }

    debug!("converted {amount} {from_code} -> {converted} {to_code}");
    Ok(converted)
}

/// Value of one unit of `from_code` in `to_code`
pub fn rate(from_code: &str, to_code: &str, table: &RateTable) -> Result<f64> {
    convert(1.0, from_code, to_code, table)
}

/// [`convert`] for a tagged amount
pub fn convert_amount(amount: &CurrencyAmount, to_code: &str, table: &RateTable) -> Result<CurrencyAmount> {
    let value = convert(amount.value, &amount.currency_code, to_code, table)?;
    Ok(CurrencyAmount::new(value, to_code.trim().to_ascii_uppercase()))
}

fn is_reference(code: &str, table: &RateTable) -> bool {
    code.trim().eq_ignore_ascii_case(table.reference())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_on_reference() {
        let table = RateTable::default_rates();
        assert_eq!(convert(100.0, "USD", "USD", &table).unwrap(), 100.0);
    }

    #[test]
    fn test_from_reference() {
        let table = RateTable::default_rates();
        assert_relative_eq!(convert(100.0, "USD", "EUR", &table).unwrap(), 92.0, max_relative = 1e-12);
    }

    #[test]
    fn test_to_reference() {
        let table = RateTable::default_rates();
        assert_relative_eq!(convert(149.5, "JPY", "USD", &table).unwrap(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cross_rate() {
        let table = RateTable::default_rates();
        let eur_to_gbp = rate("EUR", "GBP", &table).unwrap();
        assert_relative_eq!(eur_to_gbp, 0.79 / 0.92, max_relative = 1e-12);
    }

    #[test]
    fn test_unknown_codes() {
        let table = RateTable::default_rates();
        assert!(matches!(
            convert(1.0, "XYZ", "USD", &table),
            Err(EngineError::UnknownCurrency { code }) if code == "XYZ"
        ));
        assert!(convert(1.0, "USD", "XYZ", &table).is_err());
    }

    #[test]
    fn test_non_finite_amount() {
        let table = RateTable::default_rates();
        assert!(convert(f64::INFINITY, "USD", "EUR", &table).is_err());
    }

    #[test]
    fn test_overflowing_result_is_degenerate() {
        let table = RateTable::default_rates();
        assert!(matches!(
            convert(1e308, "USD", "JPY", &table),
            Err(EngineError::DegenerateResult { .. })
        ));
        // Same magnitude toward a weaker-than-reference rate still fits
        assert!(convert(1e308, "USD", "GBP", &table).unwrap().is_finite());
    }

    #[test]
    fn test_convert_amount_tags_target() {
        let table = RateTable::default_rates();
        let eur = convert_amount(&CurrencyAmount::new(50.0, "USD"), "eur", &table).unwrap();
        assert_eq!(eur.currency_code, "EUR");
        assert_relative_eq!(eur.value, 46.0, max_relative = 1e-12);
    }
}
