//! Pattern Engine - Spending Pattern Analysis
//!
//! Groups a batch of categorized transactions by category and runs four
//! independent detectors over each group. Every detector is a pure function of
//! one category's transactions that yields zero or one [`Pattern`].
//!
//! ## Detectors
//!
//! - **Trend** - average transaction size shifted between the two halves of the window
//! - **Recurring** - share of spending from charges flagged as recurring upstream
//! - **Anomaly** - a transaction more than two standard deviations from the mean
//! - **Behavioral** - spending concentrated on one weekday
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendscope_core::patterns::{PatternEngine, PatternQuery};
//! use spendscope_core::models::Timeframe;
//!
//! let engine = PatternEngine::new();
//! let query = PatternQuery::default();
//! let patterns = engine.analyze_ranked(&transactions, Timeframe::Month, &query)?;
//! ```

pub mod anomaly;
pub mod behavioral;
pub mod engine;
pub mod grouper;
pub mod ranker;
pub mod recurring;
pub mod series;
pub mod summary;
pub mod trend;
pub mod types;

pub use anomaly::AnomalyDetector;
pub use behavioral::BehavioralDetector;
pub use engine::{DetectionContext, Detector, PatternEngine, DEFAULT_CURRENCY};
pub use grouper::{category_key, group_by_category, CategoryGroup};
pub use ranker::{rank, PatternQuery, SortKey, TypeFilter};
pub use recurring::RecurringDetector;
pub use series::{build_series, PatternDetail, SeriesPoint, VisualizationSeries};
pub use summary::{ImpactCounts, PatternSummary, TypeCounts};
pub use trend::TrendDetector;
pub use types::{
    pattern_id, Impact, Pattern, PatternData, PatternType, TrendDirection, VisualizationType,
};
