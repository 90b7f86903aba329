//! Composite financial health score
//!
//! The composite is the unweighted mean of the metric scores rounded to the
//! nearest integer. Labels use the same 80/70/60 thresholds as metric status.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::metric::{FinancialMetric, MetricStatus};
use crate::error::{EngineError, Result};

/// Qualitative label for a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl HealthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Excellent => "Excellent",
            HealthLabel::Good => "Good",
            HealthLabel::Fair => "Fair",
            HealthLabel::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Label for a composite score
pub fn label_for(score: u8) -> HealthLabel {
    match MetricStatus::from_score(score as f64) {
        MetricStatus::Excellent => HealthLabel::Excellent,
        MetricStatus::Good => HealthLabel::Good,
        MetricStatus::Fair => HealthLabel::Fair,
        MetricStatus::Poor => HealthLabel::NeedsImprovement,
    }
}

/// How caller-supplied metric statuses are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Replace every status with the one implied by its score
    #[default]
    Derive,
    /// Reject metrics whose status disagrees with their score
    Strict,
}

/// Unweighted, integer-rounded mean of the metric scores
///
/// # Errors
/// `InvalidInput` for an empty slice or any score outside 0-100.
pub fn score(metrics: &[FinancialMetric]) -> Result<u8> {
    if metrics.is_empty() {
        return Err(EngineError::invalid("metrics", "at least one metric is required"));
    }
    for metric in metrics {
        metric.validate_score()?;
    }

    let mean = metrics.iter().map(|m| m.score).sum::<f64>() / metrics.len() as f64;
    let composite = mean.round().clamp(0.0, 100.0) as u8;
    debug!("composite health score {composite} from {} metrics", metrics.len());
    Ok(composite)
}

/// Bring metric statuses in line with `policy`
pub fn normalize_metrics(metrics: &[FinancialMetric], policy: StatusPolicy) -> Result<Vec<FinancialMetric>> {
    metrics
        .iter()
        .map(|metric| {
            metric.validate_score()?;
            let expected = MetricStatus::from_score(metric.score);
            if metric.status == expected {
                return Ok(metric.clone());
            }
            match policy {
                StatusPolicy::Derive => {
                    debug!(
                        "metric \"{}\": status {} replaced by {}",
                        metric.name,
                        metric.status.as_str(),
                        expected.as_str()
                    );
                    Ok(FinancialMetric {
                        status: expected,
                        ..metric.clone()
                    })
                }
                StatusPolicy::Strict => {
                    warn!("metric \"{}\" has inconsistent status", metric.name);
                    Err(EngineError::invalid(
                        "status",
                        format!(
                            "metric \"{}\" is marked {} but a score of {} is {}",
                            metric.name,
                            metric.status.as_str(),
                            metric.score,
                            expected.as_str()
                        ),
                    ))
                }
            }
        })
        .collect()
}

/// Everything the health dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub label: HealthLabel,

    /// Metrics after status normalization, input order preserved
    pub metrics: Vec<FinancialMetric>,

    /// Lowest-scoring metric (first one on ties)
    pub weakest: Option<FinancialMetric>,
}

/// Normalize metrics, score them, and pick the one most in need of attention
pub fn health_report(metrics: &[FinancialMetric], policy: StatusPolicy) -> Result<HealthReport> {
    let metrics = normalize_metrics(metrics, policy)?;
    let composite = score(&metrics)?;

    let weakest = metrics
        .iter()
        .fold(None::<&FinancialMetric>, |lowest, m| match lowest {
            Some(l) if l.score <= m.score => Some(l),
            _ => Some(m),
        })
        .cloned();

    Ok(HealthReport {
        score: composite,
        label: label_for(composite),
        metrics,
        weakest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, score: f64) -> FinancialMetric {
        FinancialMetric::new(name, score, "")
    }

    #[test]
    fn test_mean_of_extremes() {
        let metrics = vec![metric("a", 100.0), metric("b", 0.0)];
        assert_eq!(score(&metrics).unwrap(), 50);
    }

    #[test]
    fn test_rounding() {
        let metrics = vec![metric("a", 70.0), metric("b", 71.0), metric("c", 71.0)];
        // 70.67 rounds up
        assert_eq!(score(&metrics).unwrap(), 71);
    }

    #[test]
    fn test_empty_metrics_rejected() {
        assert!(matches!(
            score(&[]),
            Err(EngineError::InvalidInput { field: "metrics", .. })
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for(100), HealthLabel::Excellent);
        assert_eq!(label_for(80), HealthLabel::Excellent);
        assert_eq!(label_for(79), HealthLabel::Good);
        assert_eq!(label_for(70), HealthLabel::Good);
        assert_eq!(label_for(65), HealthLabel::Fair);
        assert_eq!(label_for(59).as_str(), "Needs Improvement");
    }

    #[test]
    fn test_derive_policy_rewrites_status() {
        let mut wrong = metric("Emergency Fund", 45.0);
        wrong.status = MetricStatus::Excellent;

        let normalized = normalize_metrics(&[wrong], StatusPolicy::Derive).unwrap();
        assert_eq!(normalized[0].status, MetricStatus::Poor);
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let mut wrong = metric("Emergency Fund", 45.0);
        wrong.status = MetricStatus::Excellent;

        assert!(normalize_metrics(&[wrong], StatusPolicy::Strict).is_err());
        assert!(normalize_metrics(&[metric("ok", 90.0)], StatusPolicy::Strict).is_ok());
    }

    #[test]
    fn test_report() {
        let metrics = vec![
            metric("Savings Rate", 85.0),
            metric("Debt-to-Income", 62.0),
            metric("Credit Utilization", 78.0),
            metric("Emergency Fund", 62.0),
        ];
        let report = health_report(&metrics, StatusPolicy::Derive).unwrap();

        assert_eq!(report.score, 72);
        assert_eq!(report.label, HealthLabel::Good);
        assert_eq!(report.weakest.unwrap().name, "Debt-to-Income");
        assert_eq!(report.metrics.len(), 4);
    }
}
