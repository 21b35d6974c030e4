//! Trend Detector
//!
//! Compares the average transaction size of the earlier half of a category's
//! time-ordered transactions with the later half. A shift of more than 15% in
//! either direction is reported; the projection is a naive +10% extrapolation
//! of the recent average and is explicitly approximate.

use super::engine::{DetectionContext, Detector};
use super::grouper::{mean, CategoryGroup};
use super::types::{
    Impact, Pattern, PatternData, PatternType, TrendDirection, VisualizationType,
};

const MIN_TRANSACTIONS: usize = 3;
const MIN_PERCENT_CHANGE: f64 = 15.0;
const HIGH_IMPACT_PERCENT: f64 = 30.0;
const PREDICTION_FACTOR: f64 = 1.1;
const CONFIDENCE: f64 = 0.85;

/// Detector for sustained increases or decreases in spend per transaction
#[derive(Debug, Default)]
pub struct TrendDetector;

impl TrendDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for TrendDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::Trend
    }

    fn name(&self) -> &'static str {
        "Trend Detector"
    }

    fn detect(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Option<Pattern> {
        if group.len() < MIN_TRANSACTIONS {
            return None;
        }

        // Group members are already sorted by date
        let amounts = group.amounts();
        let (first_half, second_half) = amounts.split_at(amounts.len() / 2);
        let first_avg = mean(first_half);
        let second_avg = mean(second_half);

        if first_avg == 0.0 {
            return None;
        }

        let percent_change = (second_avg - first_avg) / first_avg * 100.0;
        if percent_change.abs() <= MIN_PERCENT_CHANGE {
            return None;
        }

        let impact = if percent_change.abs() > HIGH_IMPACT_PERCENT {
            Impact::High
        } else {
            Impact::Medium
        };
        let direction = if percent_change > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };
        let prediction = second_avg * PREDICTION_FACTOR;
        let category = group.category;

        let (title, description) = match direction {
            TrendDirection::Increasing => (
                format!("{} spending is rising", category),
                format!(
                    "Average {} transaction grew {:.1}% over this period",
                    category,
                    percent_change.abs()
                ),
            ),
            TrendDirection::Decreasing => (
                format!("{} spending is falling", category),
                format!(
                    "Average {} transaction shrank {:.1}% over this period",
                    category,
                    percent_change.abs()
                ),
            ),
        };

        let mut insights = vec![
            format!(
                "Average transaction moved from {} to {}",
                ctx.money(first_avg),
                ctx.money(second_avg)
            ),
            format!(
                "At this pace the next average could reach about {}",
                ctx.money(prediction)
            ),
        ];
        let recommendations = match direction {
            TrendDirection::Increasing => {
                insights.push(format!(
                    "{} transactions in {} are getting more expensive",
                    group.len(),
                    category
                ));
                vec![
                    format!("Set a budget cap for {}", category),
                    format!("Review recent {} purchases for items you can skip", category),
                    "Compare prices or look for cheaper alternatives".to_string(),
                ]
            }
            TrendDirection::Decreasing => {
                insights.push(format!("You are spending less per purchase on {}", category));
                vec![
                    format!("Keep up the lower {} spending", category),
                    "Move the difference into savings".to_string(),
                ]
            }
        };

        let pattern = Pattern::new(
            PatternType::Trend,
            category,
            impact,
            CONFIDENCE,
            ctx.timeframe,
            VisualizationType::Line,
        )
        .with_text(title, description)
        .with_data(PatternData {
            amount: Some(group.total()),
            percentage: Some(percent_change),
            trend: Some(direction),
            prediction: Some(prediction),
            ..Default::default()
        })
        .with_insights(insights)
        .with_recommendations(recommendations);

        Some(pattern)
    }
}
