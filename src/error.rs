//! Error types shared by every engine component

use thiserror::Error;

/// Errors raised by the computation engine
///
/// All failures are local and synchronous. Nothing is retried and nothing is
/// turned into `NaN` or `Infinity` on the way out.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A numeric or text input is outside the accepted domain
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// An operation addressed a goal that is not in the tracker
    #[error("goal {id} not found")]
    NotFound { id: String },

    /// A currency code is missing from the rate table
    #[error("unknown currency code `{code}`")]
    UnknownCurrency { code: String },

    /// A computation would divide by zero
    #[error("degenerate result: {reason}")]
    DegenerateResult { reason: String },

    /// Configuration could not be assembled
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject NaN, infinities and negative values
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, format!("{value} is not a finite number")));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("{value} must not be negative")));
    }
    Ok(value)
}

/// Reject NaN, infinities, zero and negative values
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(EngineError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}
