//! Pattern action handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use spendscope_core::PatternAction;

#[derive(Debug, Serialize)]
pub struct ActionAccepted {
    pub accepted: bool,
}

/// POST /api/actions - Hand a pattern action to the dispatcher
///
/// The action is only recorded; nothing is executed on the caller's behalf.
pub async fn submit_action(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PatternAction>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionAccepted>), AppError> {
    let Json(action) = body.map_err(AppError::from_rejection)?;

    state
        .dispatcher
        .dispatch(&action)
        .map_err(AppError::from_core)?;

    Ok((StatusCode::ACCEPTED, Json(ActionAccepted { accepted: true })))
}
