//! Behavioral Detector
//!
//! Looks for spending concentrated on a single weekday. Days are bucketed on
//! the UTC calendar date, indexed 0 = Sunday through 6 = Saturday. When two
//! days tie for the highest total, the lower index wins.

use chrono::Datelike;

use super::engine::{DetectionContext, Detector};
use super::grouper::CategoryGroup;
use super::types::{Impact, Pattern, PatternData, PatternType, VisualizationType};

const MIN_DAY_SHARE: f64 = 0.3;
const CONFIDENCE: f64 = 0.7;
const FREQUENCY: &str = "weekly";

/// Weekday names indexed from Sunday
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Sum of amounts per weekday, Sunday first
pub fn weekday_totals(group: &CategoryGroup<'_>) -> [f64; 7] {
    let mut totals = [0.0; 7];
    for tx in &group.transactions {
        totals[tx.date.weekday().num_days_from_sunday() as usize] += tx.amount;
    }
    totals
}

/// Index of the largest total; ties resolve to the lowest index
pub fn peak_day(totals: &[f64; 7]) -> usize {
    let mut best = 0;
    for (day, &total) in totals.iter().enumerate().skip(1) {
        if total > totals[best] {
            best = day;
        }
    }
    best
}

/// Detector for weekday spending skew
#[derive(Debug, Default)]
pub struct BehavioralDetector;

impl BehavioralDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for BehavioralDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::Behavioral
    }

    fn name(&self) -> &'static str {
        "Behavioral Detector"
    }

    fn detect(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Option<Pattern> {
        let total = group.total();
        if total <= 0.0 {
            return None;
        }

        let totals = weekday_totals(group);
        let day = peak_day(&totals);
        let day_total = totals[day];
        if day_total <= MIN_DAY_SHARE * total {
            return None;
        }

        let percentage = day_total / total * 100.0;
        let day_name = WEEKDAY_NAMES[day];
        let category = group.category;
        let day_count = group
            .transactions
            .iter()
            .filter(|t| t.date.weekday().num_days_from_sunday() as usize == day)
            .count();

        let insights = vec![
            format!(
                "{:.1}% of {} spending happens on {}s",
                percentage, category, day_name
            ),
            format!(
                "{} {} transaction{} on {}s totaling {}",
                day_count,
                category,
                if day_count == 1 { "" } else { "s" },
                day_name,
                ctx.money(day_total)
            ),
        ];
        let recommendations = vec![
            format!("Plan {} purchases ahead of {}", category, day_name),
            format!("Set a {} spending limit for {}", day_name, category),
        ];

        let pattern = Pattern::new(
            PatternType::Behavioral,
            category,
            Impact::Medium,
            CONFIDENCE,
            ctx.timeframe,
            VisualizationType::Heatmap,
        )
        .with_text(
            format!("{} spending peaks on {}", category, day_name),
            format!(
                "You spend most on {} on {}s ({:.1}% of the total)",
                category, day_name, percentage
            ),
        )
        .with_data(PatternData {
            amount: Some(day_total),
            percentage: Some(percentage),
            frequency: Some(FREQUENCY.to_string()),
            ..Default::default()
        })
        .with_insights(insights)
        .with_recommendations(recommendations);

        Some(pattern)
    }
}
