//! Financial health scoring
//!
//! - Per-metric status on an excellent/good/fair/poor scale
//! - Composite score as the rounded mean of metric scores
//! - Credit score banding for the 300-850 scale

mod credit;
mod metric;
mod scorer;

pub use credit::{gauge_percent, CreditRating, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
pub use metric::{
    FinancialMetric, MetricStatus, EXCELLENT_THRESHOLD, FAIR_THRESHOLD, GOOD_THRESHOLD,
};
pub use scorer::{
    health_report, label_for, normalize_metrics, score, HealthLabel, HealthReport, StatusPolicy,
};
