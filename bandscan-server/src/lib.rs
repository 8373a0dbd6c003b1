//! Bandscan HTTP layer — a thin axum wrapper over the core scanner.
//!
//! Three routes: a banner at `/`, the known-symbol list at `/symbols`, and
//! the batch scan at `/analyze`. The table is built once before the router
//! exists and shared read-only behind an `Arc`; requests never take a lock.
//! Request validation (a positive smoothing period) happens here, at the
//! boundary — the core assumes validated inputs.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use bandscan_core::data::PriceTable;
use bandscan_core::facade::{scan, ScanRequest, ScanResponse};

/// Shared state for the HTTP server: the immutable price table.
#[derive(Clone)]
pub struct AppState {
    table: Arc<PriceTable>,
}

impl AppState {
    pub fn new(table: PriceTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

/// Create the axum router with all endpoints.
///
/// CORS is fully open — the scanner serves a static front-end from an
/// arbitrary origin and carries no credentials.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/symbols", get(list_symbols))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "bandscan EMA range scanner" }))
}

#[derive(Debug, Serialize)]
struct SymbolsResponse {
    symbols: Vec<String>,
}

/// Sorted union of every symbol across the full history, cutoff-independent.
async fn list_symbols(State(state): State<AppState>) -> Json<SymbolsResponse> {
    Json(SymbolsResponse {
        symbols: state.table.symbols(),
    })
}

/// Batch scan endpoint.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    if request.ema_period < 1 {
        return Err(ApiError::bad_request("ema_period must be a positive integer"));
    }

    tracing::info!(
        symbols = request.symbols.len(),
        period = request.ema_period,
        "Scanning symbols"
    );

    Ok(Json(scan(&state.table, &request)))
}

/// Boundary error: status code plus a one-line message body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
