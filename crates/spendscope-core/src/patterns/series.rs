//! Detail-view chart series
//!
//! Series are derived from the transactions that produced a pattern, so the
//! same input always renders the same chart.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::anomaly::scan_outliers;
use super::behavioral::{peak_day, weekday_totals, WEEKDAY_NAMES};
use super::grouper::CategoryGroup;
use super::types::{Pattern, PatternType, VisualizationType};

/// One labelled value on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    /// Marks the points the pattern is about (outliers, peak day)
    pub highlighted: bool,
}

impl SeriesPoint {
    fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            highlighted: false,
        }
    }

    fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationSeries {
    pub visualization_type: VisualizationType,
    pub points: Vec<SeriesPoint>,
}

/// A pattern plus the chart data for its detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDetail {
    pub pattern: Pattern,
    pub series: VisualizationSeries,
}

/// Build the chart series for a pattern from its category's transactions
pub fn build_series(pattern: &Pattern, group: &CategoryGroup<'_>) -> VisualizationSeries {
    let points = match pattern.pattern_type {
        PatternType::Trend => daily_totals(group),
        PatternType::Recurring => monthly_totals(group, true),
        PatternType::Seasonal => monthly_totals(group, false),
        PatternType::Anomaly => {
            let outliers: HashSet<&str> = scan_outliers(group)
                .map(|scan| scan.outliers.iter().map(|t| t.id.as_str()).collect())
                .unwrap_or_default();
            group
                .transactions
                .iter()
                .map(|t| {
                    SeriesPoint::new(t.date.format("%Y-%m-%d").to_string(), t.amount)
                        .highlighted(outliers.contains(t.id.as_str()))
                })
                .collect()
        }
        PatternType::Behavioral => {
            let totals = weekday_totals(group);
            let peak = peak_day(&totals);
            totals
                .iter()
                .enumerate()
                .map(|(day, &total)| {
                    SeriesPoint::new(WEEKDAY_NAMES[day], total).highlighted(day == peak)
                })
                .collect()
        }
    };

    VisualizationSeries {
        visualization_type: pattern.visualization_type,
        points,
    }
}

fn daily_totals(group: &CategoryGroup<'_>) -> Vec<SeriesPoint> {
    let mut days: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for tx in &group.transactions {
        *days.entry(tx.date.date_naive()).or_insert(0.0) += tx.amount;
    }
    days.into_iter()
        .map(|(day, total)| SeriesPoint::new(day.format("%Y-%m-%d").to_string(), total))
        .collect()
}

fn monthly_totals(group: &CategoryGroup<'_>, recurring_only: bool) -> Vec<SeriesPoint> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for tx in group
        .transactions
        .iter()
        .filter(|t| !recurring_only || t.is_recurring)
    {
        *months
            .entry(tx.date.format("%Y-%m").to_string())
            .or_insert(0.0) += tx.amount;
    }
    months
        .into_iter()
        .map(|(month, total)| SeriesPoint::new(month, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Timeframe, Transaction};
    use crate::patterns::types::Impact;
    use chrono::{Duration, TimeZone, Utc};

    fn tx(id: &str, amount: f64, days: i64) -> Transaction {
        // 2024-01-07 is a Sunday
        let base = Utc.with_ymd_and_hms(2024, 1, 7, 9, 0, 0).unwrap();
        Transaction::new(id, amount, "Food", "meal", base + Duration::days(days))
    }

    fn pattern(t: PatternType, viz: VisualizationType) -> Pattern {
        Pattern::new(t, "Food", Impact::Medium, 0.5, Timeframe::Month, viz)
    }

    #[test]
    fn test_trend_series_sums_per_day() {
        let txs = vec![tx("a", 10.0, 0), tx("b", 5.0, 0), tx("c", 7.0, 2)];
        let group = CategoryGroup::new("Food", txs.iter().collect());
        let series = build_series(&pattern(PatternType::Trend, VisualizationType::Line), &group);

        assert_eq!(series.visualization_type, VisualizationType::Line);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].label, "2024-01-07");
        assert_eq!(series.points[0].value, 15.0);
        assert_eq!(series.points[1].value, 7.0);
    }

    #[test]
    fn test_recurring_series_only_counts_flagged() {
        let txs = vec![
            tx("a", 10.0, 0).with_recurring(true),
            tx("b", 99.0, 1),
            tx("c", 10.0, 31).with_recurring(true),
        ];
        let group = CategoryGroup::new("Food", txs.iter().collect());
        let series = build_series(&pattern(PatternType::Recurring, VisualizationType::Bar), &group);

        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02"]);
        assert!(series.points.iter().all(|p| p.value == 10.0));
    }

    #[test]
    fn test_anomaly_series_highlights_outliers() {
        let mut txs: Vec<Transaction> = (0..9).map(|i| tx(&format!("n{}", i), 100.0, i)).collect();
        txs.push(tx("big", 1000.0, 9));
        let group = CategoryGroup::new("Food", txs.iter().collect());
        let anomaly = pattern(PatternType::Anomaly, VisualizationType::Scatter);
        let series = build_series(&anomaly, &group);

        assert_eq!(series.points.len(), 10);
        let highlighted: Vec<f64> = series
            .points
            .iter()
            .filter(|p| p.highlighted)
            .map(|p| p.value)
            .collect();
        assert_eq!(highlighted, vec![1000.0]);
    }

    #[test]
    fn test_behavioral_series_has_seven_days() {
        let txs = vec![tx("a", 10.0, 1), tx("b", 20.0, 8), tx("c", 5.0, 3)];
        let group = CategoryGroup::new("Food", txs.iter().collect());
        let series = build_series(
            &pattern(PatternType::Behavioral, VisualizationType::Heatmap),
            &group,
        );

        assert_eq!(series.points.len(), 7);
        assert_eq!(series.points[0].label, "Sunday");
        assert_eq!(series.points[1].value, 30.0);
        assert!(series.points[1].highlighted);
        assert_eq!(series.points.iter().filter(|p| p.highlighted).count(), 1);
    }

    #[test]
    fn test_series_is_deterministic() {
        let txs = vec![tx("a", 10.0, 0), tx("b", 25.0, 4), tx("c", 7.0, 9)];
        let mut reversed = txs.clone();
        reversed.reverse();
        let p = pattern(PatternType::Trend, VisualizationType::Line);

        let a = build_series(&p, &CategoryGroup::new("Food", txs.iter().collect()));
        let b = build_series(&p, &CategoryGroup::new("Food", reversed.iter().collect()));
        assert_eq!(a, b);
    }
}
