//! HTTP routes.
//!
//! | Method | Path                 | Handler |
//! |--------|----------------------|---------|
//! | GET    | `/health`            | liveness probe |
//! | POST   | `/api/pricing/quote` | authoritative price breakdown |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use printshop_core::{calculate_price_with, PriceBreakdown, PriceCalculationInput};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

pub const QUOTE_PATH: &str = "/api/pricing/quote";
pub const HEALTH_PATH: &str = "/health";

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(QUOTE_PATH, post(quote))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// The body is taken as raw bytes so that a missing or wrong Content-Type
// is not rejected; any JSON object is priced. Body read failures (size
// limit) go through ApiError so every error shares one JSON shape.
async fn quote(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PriceBreakdown>, ApiError> {
    let body = body?;
    let value: Value = serde_json::from_slice(&body)?;
    let input = PriceCalculationInput::from_json_value(&value)?;

    let breakdown = calculate_price_with(&input, &state.fees);

    tracing::debug!(
        currency = %breakdown.currency,
        quantity = input.quantity,
        total = breakdown.total,
        is_estimate = breakdown.is_estimate,
        "quote computed"
    );

    Ok(Json(breakdown))
}
