//! Credit score bands on the 300-850 scale

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;

/// Band a credit score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreditRating {
    Poor,
    Fair,
    Good,
    VeryGood,
    Exceptional,
}

impl CreditRating {
    /// Classify a score
    ///
    /// # Errors
    /// `InvalidInput` when the score is outside 300-850.
    pub fn from_score(score: u16) -> Result<Self> {
        ensure_in_scale(score)?;
        Ok(match score {
            800.. => CreditRating::Exceptional,
            740..=799 => CreditRating::VeryGood,
            670..=739 => CreditRating::Good,
            580..=669 => CreditRating::Fair,
            _ => CreditRating::Poor,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRating::Poor => "Poor",
            CreditRating::Fair => "Fair",
            CreditRating::Good => "Good",
            CreditRating::VeryGood => "Very Good",
            CreditRating::Exceptional => "Exceptional",
        }
    }
}

/// Position of the score along the scale, 0 at 300 and 100 at 850
pub fn gauge_percent(score: u16) -> Result<f64> {
    ensure_in_scale(score)?;
    let span = (MAX_CREDIT_SCORE - MIN_CREDIT_SCORE) as f64;
    Ok(((score - MIN_CREDIT_SCORE) as f64 / span * 100.0).clamp(0.0, 100.0))
}

fn ensure_in_scale(score: u16) -> Result<()> {
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
        return Err(EngineError::invalid(
            "credit_score",
            format!("{score} is outside {MIN_CREDIT_SCORE}-{MAX_CREDIT_SCORE}"),
        ));
    }
    Ok(())
}
