//! Pattern Engine - runs every detector over every category

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{validate_transactions, Timeframe, Transaction};

use super::grouper::{category_key, group_by_category, CategoryGroup};
use super::ranker::{rank, PatternQuery};
use super::series::{build_series, PatternDetail};
use super::types::{Pattern, PatternType};
use super::{AnomalyDetector, BehavioralDetector, RecurringDetector, TrendDetector};

/// Currency symbol used in generated text unless the caller picks another
pub const DEFAULT_CURRENCY: &str = "฿";

/// Context shared by all detectors during one analysis call
#[derive(Debug, Clone)]
pub struct DetectionContext {
    /// Window label echoed into each pattern
    pub timeframe: Timeframe,
    /// Symbol prefixed to amounts in titles and insights
    pub currency: String,
}

impl DetectionContext {
    pub fn new(timeframe: Timeframe, currency: impl Into<String>) -> Self {
        Self {
            timeframe,
            currency: currency.into(),
        }
    }

    /// Format an amount for generated text
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }
}

/// A pure function from one category's transactions to zero or one pattern
pub trait Detector: Send + Sync {
    /// Pattern type this detector emits
    fn pattern_type(&self) -> PatternType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect one category; `None` means there was not enough signal
    fn detect(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Option<Pattern>;
}

/// The main pattern engine
pub struct PatternEngine {
    detectors: Vec<Box<dyn Detector>>,
    currency: String,
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternEngine {
    /// Create an engine with the built-in detectors in their fixed order
    pub fn new() -> Self {
        let mut engine = Self {
            detectors: vec![],
            currency: DEFAULT_CURRENCY.to_string(),
        };

        engine.register(Box::new(TrendDetector::new()));
        engine.register(Box::new(RecurringDetector::new()));
        engine.register(Box::new(AnomalyDetector::new()));
        engine.register(Box::new(BehavioralDetector::new()));

        engine
    }

    /// Use a different currency symbol in generated text
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Register an additional detector; it runs after the existing ones
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Pattern types of the registered detectors, in run order
    pub fn detector_types(&self) -> Vec<PatternType> {
        self.detectors.iter().map(|d| d.pattern_type()).collect()
    }

    /// Run all detectors over all categories
    ///
    /// Output is ordered by category (ascending), then by detector run order.
    /// Fails only if the batch breaks the ingestion contract.
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        timeframe: Timeframe,
    ) -> Result<Vec<Pattern>> {
        validate_transactions(transactions)?;

        let ctx = DetectionContext::new(timeframe, self.currency.clone());
        let groups = group_by_category(transactions);

        let mut patterns = Vec::new();
        for group in &groups {
            patterns.extend(self.detect_group(group, &ctx));
        }

        info!(
            transactions = transactions.len(),
            categories = groups.len(),
            patterns = patterns.len(),
            timeframe = timeframe.as_str(),
            "Pattern analysis complete"
        );

        Ok(patterns)
    }

    /// Analyze, then filter and sort the result
    pub fn analyze_ranked(
        &self,
        transactions: &[Transaction],
        timeframe: Timeframe,
        query: &PatternQuery,
    ) -> Result<Vec<Pattern>> {
        let patterns = self.analyze(transactions, timeframe)?;
        Ok(rank(patterns, query))
    }

    /// Regenerate one pattern by id together with its chart series
    pub fn detail(
        &self,
        transactions: &[Transaction],
        timeframe: Timeframe,
        pattern_id: &str,
    ) -> Result<PatternDetail> {
        let pattern = self
            .analyze(transactions, timeframe)?
            .into_iter()
            .find(|p| p.id == pattern_id)
            .ok_or_else(|| Error::NotFound(format!("pattern {}", pattern_id)))?;

        let group = group_by_category(transactions)
            .into_iter()
            .find(|g| g.key == category_key(&pattern.category))
            .ok_or_else(|| Error::NotFound(format!("category {}", pattern.category)))?;

        let series = build_series(&pattern, &group);
        Ok(PatternDetail { pattern, series })
    }

    fn detect_group(&self, group: &CategoryGroup<'_>, ctx: &DetectionContext) -> Vec<Pattern> {
        self.detectors
            .iter()
            .filter_map(|detector| {
                let pattern = detector.detect(group, ctx)?;
                debug!(
                    detector = detector.name(),
                    category = group.category,
                    impact = pattern.impact.as_str(),
                    "Pattern detected"
                );
                Some(pattern)
            })
            .collect()
    }
}
