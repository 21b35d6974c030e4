//! Aggregate counts over a pattern list for dashboard headers

use serde::{Deserialize, Serialize};

use super::types::{Impact, Pattern, PatternType, TrendDirection};

/// Patterns at or above this confidence count as high confidence
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    pub trend: usize,
    pub recurring: usize,
    pub anomaly: usize,
    pub behavioral: usize,
    pub seasonal: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub total: usize,
    pub by_impact: ImpactCounts,
    pub by_type: TypeCounts,
    pub high_confidence: usize,
    pub increasing_trends: usize,
    pub decreasing_trends: usize,
}

impl PatternSummary {
    pub fn from_patterns(patterns: &[Pattern]) -> Self {
        let mut summary = Self {
            total: patterns.len(),
            ..Default::default()
        };

        for pattern in patterns {
            match pattern.impact {
                Impact::Critical => summary.by_impact.critical += 1,
                Impact::High => summary.by_impact.high += 1,
                Impact::Medium => summary.by_impact.medium += 1,
                Impact::Low => summary.by_impact.low += 1,
            }
            match pattern.pattern_type {
                PatternType::Trend => summary.by_type.trend += 1,
                PatternType::Recurring => summary.by_type.recurring += 1,
                PatternType::Anomaly => summary.by_type.anomaly += 1,
                PatternType::Behavioral => summary.by_type.behavioral += 1,
                PatternType::Seasonal => summary.by_type.seasonal += 1,
            }
            if pattern.confidence >= HIGH_CONFIDENCE_THRESHOLD {
                summary.high_confidence += 1;
            }
            match pattern.data.trend {
                Some(TrendDirection::Increasing) => summary.increasing_trends += 1,
                Some(TrendDirection::Decreasing) => summary.decreasing_trends += 1,
                None => {}
            }
        }

        summary
    }
}
