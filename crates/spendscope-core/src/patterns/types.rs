//! Core types for the pattern engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Timeframe;

use super::grouper::category_key;

/// Kinds of spending patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Average transaction size shifted between the two halves of the window
    Trend,
    /// Charges flagged upstream as repeating
    Recurring,
    /// A transaction far outside the category's usual amount
    Anomaly,
    /// Spending concentrated on one weekday
    Behavioral,
    /// Reserved; no detector emits it yet
    Seasonal,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Trend => "trend",
            PatternType::Recurring => "recurring",
            PatternType::Anomaly => "anomaly",
            PatternType::Behavioral => "behavioral",
            PatternType::Seasonal => "seasonal",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trend" => Ok(PatternType::Trend),
            "recurring" => Ok(PatternType::Recurring),
            "anomaly" => Ok(PatternType::Anomaly),
            "behavioral" => Ok(PatternType::Behavioral),
            "seasonal" => Ok(PatternType::Seasonal),
            _ => Err(format!("Unknown pattern type: {}", s)),
        }
    }
}

/// Coarse severity of a pattern, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
            Impact::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Impact::Low => 1,
            Impact::Medium => 2,
            Impact::High => 3,
            Impact::Critical => 4,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Impact::Low),
            "medium" => Ok(Impact::Medium),
            "high" => Ok(Impact::High),
            "critical" => Ok(Impact::Critical),
            _ => Err(format!("Unknown impact: {}", s)),
        }
    }
}

/// Direction of a trend pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chart hint for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationType {
    Line,
    Bar,
    Scatter,
    Heatmap,
    Pie,
}

impl VisualizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationType::Line => "line",
            VisualizationType::Bar => "bar",
            VisualizationType::Scatter => "scatter",
            VisualizationType::Heatmap => "heatmap",
            VisualizationType::Pie => "pie",
        }
    }
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detector-specific figures attached to a pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

/// An explained observation about spending in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Stable per detector and category (e.g., "trend:food_&_dining")
    pub id: String,
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Fixed heuristic score in [0, 1]
    pub confidence: f64,
    pub impact: Impact,
    pub timeframe: Timeframe,
    pub data: PatternData,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub visualization_type: VisualizationType,
}

impl Pattern {
    /// Create a new pattern with empty data and text lists
    pub fn new(
        pattern_type: PatternType,
        category: impl Into<String>,
        impact: Impact,
        confidence: f64,
        timeframe: Timeframe,
        visualization_type: VisualizationType,
    ) -> Self {
        let category = category.into();
        Self {
            id: pattern_id(pattern_type, &category),
            pattern_type,
            category,
            title: String::new(),
            description: String::new(),
            confidence: confidence.clamp(0.0, 1.0),
            impact,
            timeframe,
            data: PatternData::default(),
            insights: vec![],
            recommendations: vec![],
            visualization_type,
        }
    }

    pub fn with_text(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }

    pub fn with_data(mut self, data: PatternData) -> Self {
        self.data = data;
        self
    }

    pub fn with_insights(mut self, insights: Vec<String>) -> Self {
        self.insights = insights;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

/// Build the stable id for a detector/category pair
///
/// The slug is the grouping key with spaces turned into underscores. Keys
/// never contain `_`, so two groups can never share an id.
pub fn pattern_id(pattern_type: PatternType, category: &str) -> String {
    format!(
        "{}:{}",
        pattern_type.as_str(),
        category_key(category).replace(' ', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_type_round_trip() {
        assert_eq!(PatternType::Behavioral.as_str(), "behavioral");
        assert_eq!(
            PatternType::from_str("anomaly").unwrap(),
            PatternType::Anomaly
        );
        assert!(PatternType::from_str("weekly").is_err());
    }

    #[test]
    fn test_impact_ordering() {
        assert!(Impact::Critical > Impact::High);
        assert!(Impact::High > Impact::Medium);
        assert!(Impact::Medium > Impact::Low);
        assert!(Impact::Critical.priority() > Impact::High.priority());
        assert_eq!(Impact::Low.priority(), 1);
    }

    #[test]
    fn test_pattern_id_is_stable() {
        assert_eq!(
            pattern_id(PatternType::Trend, "Food & Dining"),
            "trend:food_&_dining"
        );
        assert_eq!(
            pattern_id(PatternType::Trend, "Food & Dining"),
            pattern_id(PatternType::Trend, " food & dining ")
        );
        assert_eq!(
            pattern_id(PatternType::Anomaly, "Dining_Out"),
            pattern_id(PatternType::Anomaly, "dining  out")
        );
    }

    #[test]
    fn test_pattern_builder_clamps_confidence() {
        let pattern = Pattern::new(
            PatternType::Anomaly,
            "Shopping",
            Impact::High,
            1.7,
            Timeframe::Week,
            VisualizationType::Scatter,
        )
        .with_text("Title", "Description");

        assert_eq!(pattern.confidence, 1.0);
        assert_eq!(pattern.id, "anomaly:shopping");
        assert_eq!(pattern.title, "Title");
    }

    #[test]
    fn test_pattern_serializes_for_presentation() {
        let pattern = Pattern::new(
            PatternType::Trend,
            "Transport",
            Impact::Medium,
            0.85,
            Timeframe::Month,
            VisualizationType::Line,
        )
        .with_data(PatternData {
            trend: Some(TrendDirection::Decreasing),
            ..Default::default()
        });

        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["type"], "trend");
        assert_eq!(json["impact"], "medium");
        assert_eq!(json["timeframe"], "month");
        assert_eq!(json["visualizationType"], "line");
        assert_eq!(json["data"]["trend"], "decreasing");
        assert!(json["data"].get("prediction").is_none());
    }
}
