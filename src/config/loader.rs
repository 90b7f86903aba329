//! CSV-based configuration loader
//!
//! Loads engine configuration from CSV files in data/config/

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use log::info;

use crate::error::{EngineError, Result};

/// Default path to the configuration directory
pub const DEFAULT_CONFIG_PATH: &str = "data/config";

/// File holding `code,rate` rows; the first row is the reference currency
pub const CURRENCY_RATES_FILE: &str = "currency_rates.csv";

/// Optional file holding `key,value` rows
pub const ENGINE_SETTINGS_FILE: &str = "engine_settings.csv";

/// Load currency rates from CSV
/// Returns the reference code and every (code, rate) row in file order.
/// A code listed twice (case-insensitively) is a configuration error.
pub fn load_currency_rates(path: &Path) -> Result<(String, Vec<(String, f64)>)> {
    let file = File::open(path.join(CURRENCY_RATES_FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rates = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result?;
        let code = field(&record, 0, "code")?.trim().to_string();
        let raw = field(&record, 1, "rate")?;
        let rate: f64 = raw
            .trim()
            .parse()
            .map_err(|_| EngineError::Config(format!("rate for {code} is not a number: {raw}")))?;
        if !seen.insert(code.to_ascii_uppercase()) {
            return Err(EngineError::Config(format!(
                "{CURRENCY_RATES_FILE} lists {code} more than once"
            )));
        }
        rates.push((code, rate));
    }

    let reference = rates
        .first()
        .map(|(code, _)| code.clone())
        .ok_or_else(|| EngineError::Config(format!("{CURRENCY_RATES_FILE} has no rows")))?;

    info!("loaded {} currency rates with reference {}", rates.len(), reference);
    Ok((reference, rates))
}

/// Load engine settings from CSV
/// Returns an empty map when the file does not exist
pub fn load_engine_settings(path: &Path) -> Result<HashMap<String, String>> {
    let full_path = path.join(ENGINE_SETTINGS_FILE);
    if !full_path.exists() {
        return Ok(HashMap::new());
    }

    let file = File::open(full_path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut settings = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let key = field(&record, 0, "key")?.trim().to_string();
        let value = field(&record, 1, "value")?.trim().to_string();
        settings.insert(key, value);
    }

    Ok(settings)
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str> {
    record.get(index).ok_or_else(|| {
        EngineError::Config(format!(
            "line {}: missing `{name}` column",
            record.position().map(|p| p.line()).unwrap_or(0)
        ))
    })
}
