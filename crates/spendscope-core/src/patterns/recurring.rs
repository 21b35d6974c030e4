//! Recurring Detector
//!
//! Aggregates transactions flagged as recurring upstream. Recurrence itself is
//! never inferred here; the frequency label is static because the input
//! carries no periodicity.

use super::engine::{DetectionContext, Detector};
use super::grouper::CategoryGroup;
use super::types::{Impact, Pattern, PatternData, PatternType, VisualizationType};

const CONFIDENCE: f64 = 0.95;
const HIGH_IMPACT_MEAN_MULTIPLE: f64 = 2.0;
const FREQUENCY: &str = "monthly";

/// Detector for recurring charges within a category
#[derive(Debug, Default)]
pub struct RecurringDetector;

impl RecurringDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for RecurringDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::Recurring
    }

    fn name(&self) -> &'static str {
        "Recurring Detector"
    }

    fn detect(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Option<Pattern> {
        let recurring: Vec<f64> = group
            .transactions
            .iter()
            .filter(|t| t.is_recurring)
            .map(|t| t.amount)
            .collect();
        if recurring.is_empty() {
            return None;
        }

        let total = group.total();
        if total <= 0.0 {
            return None;
        }

        let recurring_amount: f64 = recurring.iter().sum();
        let percentage = recurring_amount / total * 100.0;
        let impact = if recurring_amount > HIGH_IMPACT_MEAN_MULTIPLE * group.mean() {
            Impact::High
        } else {
            Impact::Medium
        };
        let category = group.category;

        let insights = vec![
            format!(
                "{} recurring charge{} totaling {}",
                recurring.len(),
                if recurring.len() == 1 { "" } else { "s" },
                ctx.money(recurring_amount)
            ),
            format!(
                "Recurring charges make up {:.1}% of {} spending",
                percentage, category
            ),
        ];
        let recommendations = vec![
            format!("Review your {} subscriptions and cancel the ones you no longer use", category),
            "Look for annual plans or bundles that cost less".to_string(),
            "Set reminders before renewal dates".to_string(),
        ];

        let pattern = Pattern::new(
            PatternType::Recurring,
            category,
            impact,
            CONFIDENCE,
            ctx.timeframe,
            VisualizationType::Bar,
        )
        .with_text(
            format!("Recurring {} charges", category),
            format!(
                "{} of {} spending comes from recurring charges",
                ctx.money(recurring_amount),
                category
            ),
        )
        .with_data(PatternData {
            amount: Some(recurring_amount),
            percentage: Some(percentage),
            frequency: Some(FREQUENCY.to_string()),
            ..Default::default()
        })
        .with_insights(insights)
        .with_recommendations(recommendations);

        Some(pattern)
    }
}
