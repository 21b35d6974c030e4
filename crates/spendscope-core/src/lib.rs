//! Spendscope Core Library
//!
//! Spending pattern analysis for the Spendscope dashboard:
//! - Transaction model and ingestion-boundary validation
//! - CSV/JSON transaction import
//! - Pattern engine: category grouping, trend/recurring/anomaly/behavioral
//!   detectors, ranking and filtering
//! - Summary counts and deterministic detail-view chart series
//! - Pattern action requests handed to an external dispatcher

pub mod actions;
pub mod error;
pub mod import;
pub mod models;
pub mod patterns;

pub use actions::{ActionDispatcher, ActionType, LoggingDispatcher, PatternAction};
pub use error::{Error, Result};
pub use import::{load_transactions, parse_csv, parse_json, ImportFormat};
pub use models::{validate_transactions, Timeframe, Transaction};
pub use patterns::{
    Impact, Pattern, PatternData, PatternDetail, PatternEngine, PatternQuery, PatternSummary,
    PatternType, SortKey, TrendDirection, TypeFilter, VisualizationType,
};
