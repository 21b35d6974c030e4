//! Anomaly Detector
//!
//! Flags transactions whose amount lies more than two population standard
//! deviations from the category mean (strictly greater). The largest flagged
//! transaction represents the pattern.

use crate::models::Transaction;

use super::engine::{DetectionContext, Detector};
use super::grouper::CategoryGroup;
use super::types::{Impact, Pattern, PatternData, PatternType, VisualizationType};

const STDDEV_MULTIPLE: f64 = 2.0;
const CRITICAL_MEAN_MULTIPLE: f64 = 3.0;
const CONFIDENCE: f64 = 0.75;

/// Outlier scan of one category
#[derive(Debug, Clone)]
pub struct OutlierScan<'a> {
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    pub outliers: Vec<&'a Transaction>,
}

/// Mean, population stddev, and the transactions outside `mean ± 2σ`
///
/// Returns `None` for an empty group or when every amount is identical.
pub fn scan_outliers<'a>(group: &CategoryGroup<'a>) -> Option<OutlierScan<'a>> {
    if group.is_empty() {
        return None;
    }

    let mean = group.mean();
    let variance = group
        .transactions
        .iter()
        .map(|t| (t.amount - mean).powi(2))
        .sum::<f64>()
        / group.len() as f64;
    let stddev = variance.sqrt();
    if stddev <= 0.0 {
        return None;
    }

    let outliers = group
        .transactions
        .iter()
        .copied()
        .filter(|t| (t.amount - mean).abs() > STDDEV_MULTIPLE * stddev)
        .collect();

    Some(OutlierScan {
        mean,
        stddev,
        outliers,
    })
}

/// Detector for unusually sized transactions
#[derive(Debug, Default)]
pub struct AnomalyDetector;

impl AnomalyDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for AnomalyDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::Anomaly
    }

    fn name(&self) -> &'static str {
        "Anomaly Detector"
    }

    fn detect(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Option<Pattern> {
        let scan = scan_outliers(group)?;

        // Largest amount wins; on a tie the earliest (canonical order) is kept
        let representative = scan
            .outliers
            .iter()
            .copied()
            .reduce(|best, t| if t.amount > best.amount { t } else { best })?;

        let mean = scan.mean;
        let percentage = (representative.amount - mean) / mean * 100.0;
        let impact = if representative.amount > mean * CRITICAL_MEAN_MULTIPLE {
            Impact::Critical
        } else {
            Impact::High
        };
        let relation = if percentage >= 0.0 { "above" } else { "below" };
        let comparison = format!("{:.1}% {} average", percentage.abs(), relation);
        let merchant = representative
            .merchant
            .as_deref()
            .unwrap_or("Unknown merchant");
        let category = group.category;

        let mut insights = vec![
            format!(
                "{} charged {} for \"{}\" on {}",
                merchant,
                ctx.money(representative.amount),
                representative.description,
                representative.date.format("%Y-%m-%d")
            ),
            format!(
                "Typical {} transaction is {}; this one is {}",
                category,
                ctx.money(mean),
                comparison
            ),
        ];
        if scan.outliers.len() > 1 {
            insights.push(format!(
                "{} transactions in {} fall outside the usual range",
                scan.outliers.len(),
                category
            ));
        }
        let recommendations = vec![
            "Confirm this charge is legitimate".to_string(),
            format!(
                "Set an alert for {} transactions above {}",
                category,
                ctx.money(mean + STDDEV_MULTIPLE * scan.stddev)
            ),
            "Plan ahead for large one-off purchases".to_string(),
        ];

        let pattern = Pattern::new(
            PatternType::Anomaly,
            category,
            impact,
            CONFIDENCE,
            ctx.timeframe,
            VisualizationType::Scatter,
        )
        .with_text(
            format!("Unusual {} transaction", category),
            format!(
                "A {} charge at {} is {}",
                ctx.money(representative.amount),
                merchant,
                comparison
            ),
        )
        .with_data(PatternData {
            amount: Some(representative.amount),
            percentage: Some(percentage),
            comparison: Some(comparison),
            ..Default::default()
        })
        .with_insights(insights)
        .with_recommendations(recommendations);

        Some(pattern)
    }
}
