//! Spendscope Web Server
//!
//! Axum-based REST API around the pattern engine. Every request carries its
//! own transactions; the server keeps no data between requests.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Input validation (request body size, transaction count limits)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use spendscope_core::patterns::DEFAULT_CURRENCY;
use spendscope_core::{ActionDispatcher, LoggingDispatcher, PatternEngine};

mod handlers;

/// Maximum request body size (10 MB)
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default cap on transactions per request
pub const DEFAULT_MAX_TRANSACTIONS: usize = 10_000;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Largest transaction batch accepted in one request
    pub max_transactions: usize,
    /// Currency symbol used in generated pattern text
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `SPENDSCOPE_ALLOWED_ORIGINS` (comma-separated) and
    /// `SPENDSCOPE_MAX_TRANSACTIONS`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(origins) = std::env::var("SPENDSCOPE_ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }

        if let Ok(raw) = std::env::var("SPENDSCOPE_MAX_TRANSACTIONS") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_transactions = n,
                _ => warn!(
                    value = %raw,
                    "Ignoring invalid SPENDSCOPE_MAX_TRANSACTIONS, using {}",
                    DEFAULT_MAX_TRANSACTIONS
                ),
            }
        }

        config
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub engine: PatternEngine,
    pub config: ServerConfig,
    pub dispatcher: Box<dyn ActionDispatcher>,
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    create_router_with_dispatcher(config, Box::new(LoggingDispatcher))
}

/// Create the router with a custom action dispatcher
pub fn create_router_with_dispatcher(
    config: ServerConfig,
    dispatcher: Box<dyn ActionDispatcher>,
) -> Router {
    let state = Arc::new(AppState {
        engine: PatternEngine::new().with_currency(config.currency.clone()),
        config: config.clone(),
        dispatcher,
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/patterns", post(handlers::list_patterns))
        .route("/patterns/summary", post(handlers::pattern_summary))
        .route("/patterns/:id/detail", post(handlers::pattern_detail))
        .route("/actions", post(handlers::submit_action));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS restricted to same-origin");
    }

    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map an engine error onto a client or server status
    pub fn from_core(err: spendscope_core::Error) -> Self {
        use spendscope_core::Error;

        match err {
            Error::InvalidTransaction { .. }
            | Error::InvalidData(_)
            | Error::Import(_)
            | Error::Csv(_)
            | Error::Json(_) => {
                warn!(error = %err, "Rejected request");
                Self::bad_request(&err.to_string())
            }
            Error::NotFound(_) => Self::not_found(&err.to_string()),
            Error::Io(_) => err.into(),
        }
    }

    /// Turn a JSON extractor rejection into a 400
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Malformed request body");
        Self::bad_request(&rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
