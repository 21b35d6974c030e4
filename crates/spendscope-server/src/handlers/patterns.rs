//! Pattern analysis handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppError, AppState};
use spendscope_core::{
    Pattern, PatternDetail, PatternQuery, PatternSummary, SortKey, Timeframe, Transaction,
    TypeFilter,
};

/// Request body for POST /api/patterns
#[derive(Debug, Deserialize)]
pub struct PatternsRequest {
    pub transactions: Vec<Transaction>,
    /// week, month, quarter, year (default month)
    pub timeframe: Option<String>,
    /// all or a single pattern type (default all)
    #[serde(rename = "type")]
    pub pattern_type: Option<String>,
    /// impact, confidence, id (default impact)
    pub sort: Option<String>,
}

/// Request body for the summary and detail endpoints
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub transactions: Vec<Transaction>,
    pub timeframe: Option<String>,
}

/// Parse an optional request field, using the type's default when absent
fn parse_or_default<T>(value: Option<&str>) -> Result<T, AppError>
where
    T: FromStr<Err = String> + Default,
{
    match value {
        Some(raw) => T::from_str(raw.trim()).map_err(|e| AppError::bad_request(&e)),
        None => Ok(T::default()),
    }
}

fn check_batch_size(state: &AppState, transactions: &[Transaction]) -> Result<(), AppError> {
    if transactions.len() > state.config.max_transactions {
        warn!(
            count = transactions.len(),
            max = state.config.max_transactions,
            "Transaction batch too large"
        );
        return Err(AppError::bad_request(&format!(
            "Too many transactions (max {})",
            state.config.max_transactions
        )));
    }
    Ok(())
}

/// POST /api/patterns - Detect, filter and sort patterns
pub async fn list_patterns(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PatternsRequest>, JsonRejection>,
) -> Result<Json<Vec<Pattern>>, AppError> {
    let Json(req) = body.map_err(AppError::from_rejection)?;
    check_batch_size(&state, &req.transactions)?;

    let timeframe: Timeframe = parse_or_default(req.timeframe.as_deref())?;
    let filter: TypeFilter = parse_or_default(req.pattern_type.as_deref())?;
    let sort: SortKey = parse_or_default(req.sort.as_deref())?;
    let query = PatternQuery::new(filter, sort);

    let patterns = state
        .engine
        .analyze_ranked(&req.transactions, timeframe, &query)
        .map_err(AppError::from_core)?;

    info!(
        transactions = req.transactions.len(),
        patterns = patterns.len(),
        filter = %query.filter,
        sort = %query.sort,
        "Served pattern list"
    );

    Ok(Json(patterns))
}

/// POST /api/patterns/summary - Pattern counts for a dashboard header
pub async fn pattern_summary(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<PatternSummary>, AppError> {
    let Json(req) = body.map_err(AppError::from_rejection)?;
    check_batch_size(&state, &req.transactions)?;

    let timeframe: Timeframe = parse_or_default(req.timeframe.as_deref())?;
    let patterns = state
        .engine
        .analyze(&req.transactions, timeframe)
        .map_err(AppError::from_core)?;

    Ok(Json(PatternSummary::from_patterns(&patterns)))
}

/// POST /api/patterns/:id/detail - One pattern plus its chart series
pub async fn pattern_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<PatternDetail>, AppError> {
    let Json(req) = body.map_err(AppError::from_rejection)?;
    check_batch_size(&state, &req.transactions)?;

    let timeframe: Timeframe = parse_or_default(req.timeframe.as_deref())?;
    let detail = state
        .engine
        .detail(&req.transactions, timeframe, &id)
        .map_err(AppError::from_core)?;

    Ok(Json(detail))
}
