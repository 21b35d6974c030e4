//! Pattern ranking and filtering
//!
//! A pure reordering/filtering pass over engine output. Sorting is stable, so
//! patterns with equal keys keep the engine's (category, detector) order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{Pattern, PatternType};

/// Which pattern types to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PatternType),
}

impl TypeFilter {
    pub fn matches(&self, pattern: &Pattern) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => pattern.pattern_type == *t,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Only(t) => write!(f, "{}", t),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            other => other.parse::<PatternType>().map(TypeFilter::Only),
        }
    }
}

/// Sort order for ranked output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most severe first
    #[default]
    Impact,
    /// Highest confidence first
    Confidence,
    /// Ascending lexicographic pattern id (groups by detector, then category)
    Id,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Impact => "impact",
            SortKey::Confidence => "confidence",
            SortKey::Id => "id",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "impact" => Ok(SortKey::Impact),
            "confidence" => Ok(SortKey::Confidence),
            "id" | "category" => Ok(SortKey::Id),
            _ => Err(format!(
                "Unknown sort key: {} (available: impact, confidence, id)",
                s
            )),
        }
    }
}

/// Filter plus sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternQuery {
    pub filter: TypeFilter,
    pub sort: SortKey,
}

impl PatternQuery {
    pub fn new(filter: TypeFilter, sort: SortKey) -> Self {
        Self { filter, sort }
    }
}

/// Filter by type and sort by the chosen key
pub fn rank(patterns: Vec<Pattern>, query: &PatternQuery) -> Vec<Pattern> {
    let mut ranked: Vec<Pattern> = patterns
        .into_iter()
        .filter(|p| query.filter.matches(p))
        .collect();

    match query.sort {
        SortKey::Impact => {
            ranked.sort_by(|a, b| b.impact.priority().cmp(&a.impact.priority()));
        }
        SortKey::Confidence => {
            ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        }
        SortKey::Id => {
            ranked.sort_by(|a, b| a.id.cmp(&b.id));
        }
    }

    ranked
}
