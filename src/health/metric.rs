//! Financial sub-metrics and the four-tier status scale

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Lowest score that still rates as excellent
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// Lowest score that still rates as good
pub const GOOD_THRESHOLD: f64 = 70.0;
/// Lowest score that still rates as fair
pub const FAIR_THRESHOLD: f64 = 60.0;

/// Tier of a single metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MetricStatus {
    /// Tier implied by a 0-100 score
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            MetricStatus::Excellent
        } else if score >= GOOD_THRESHOLD {
            MetricStatus::Good
        } else if score >= FAIR_THRESHOLD {
            MetricStatus::Fair
        } else {
            MetricStatus::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Excellent => "excellent",
            MetricStatus::Good => "good",
            MetricStatus::Fair => "fair",
            MetricStatus::Poor => "poor",
        }
    }
}

/// One input to the composite health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetric {
    /// e.g. "Savings Rate", "Debt-to-Income"
    pub name: String,

    /// 0-100
    pub score: f64,

    pub status: MetricStatus,
    pub description: String,

    /// Suggestions shown next to the metric
    #[serde(default)]
    pub tips: Vec<String>,
}

impl FinancialMetric {
    /// Metric whose status is derived from its score
    pub fn new(name: impl Into<String>, score: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            status: MetricStatus::from_score(score),
            description: description.into(),
            tips: Vec::new(),
        }
    }

    pub fn with_tips<I, S>(mut self, tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tips = tips.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the supplied status agrees with the score thresholds
    pub fn status_is_consistent(&self) -> bool {
        self.status == MetricStatus::from_score(self.score)
    }

    pub(crate) fn validate_score(&self) -> Result<()> {
        if !self.score.is_finite() || !(0.0..=100.0).contains(&self.score) {
            return Err(EngineError::invalid(
                "score",
                format!("metric \"{}\" has score {} outside 0-100", self.name, self.score),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(MetricStatus::from_score(100.0), MetricStatus::Excellent);
        assert_eq!(MetricStatus::from_score(80.0), MetricStatus::Excellent);
        assert_eq!(MetricStatus::from_score(79.9), MetricStatus::Good);
        assert_eq!(MetricStatus::from_score(70.0), MetricStatus::Good);
        assert_eq!(MetricStatus::from_score(60.0), MetricStatus::Fair);
        assert_eq!(MetricStatus::from_score(59.0), MetricStatus::Poor);
        assert_eq!(MetricStatus::from_score(0.0), MetricStatus::Poor);
    }

    #[test]
    fn test_new_derives_status() {
        let metric = FinancialMetric::new("Savings Rate", 72.0, "Share of income saved")
            .with_tips(["Automate transfers"]);
        assert_eq!(metric.status, MetricStatus::Good);
        assert!(metric.status_is_consistent());
        assert_eq!(metric.tips, vec!["Automate transfers".to_string()]);
    }

    #[test]
    fn test_score_range_validation() {
        assert!(FinancialMetric::new("x", 101.0, "").validate_score().is_err());
        assert!(FinancialMetric::new("x", -1.0, "").validate_score().is_err());
        assert!(FinancialMetric::new("x", f64::NAN, "").validate_score().is_err());
        assert!(FinancialMetric::new("x", 55.5, "").validate_score().is_ok());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&MetricStatus::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
    }
}
