//! HTTP API — the request/response contract with the client.
//!
//! Two routes:
//!   - `POST /api/analyze` — image batch in, report out
//!   - `GET  /api/health`  — liveness probe
//!
//! Wire shapes: `200 {success: true, data}` on success,
//! `{success: false, message, error?}` on failure. Batch bounds are
//! enforced here before the gateway sees the request (and again inside it).

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::intake::{MAX_IMAGES, MIN_IMAGES};
use crate::AppState;

/// Request bodies up to 50 MiB — twenty 10 MiB images never fit, but twenty
/// typical screenshots as base64 do.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

/// POST /api/analyze
///
/// The body is validated by hand rather than with a typed extractor so a
/// missing or malformed `images` field produces the contract's own 400
/// shape instead of a framework rejection.
async fn analyze(State(state): State<AppState>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    let images = body
        .get("images")
        .and_then(Value::as_array)
        .ok_or_else(|| bad_request_count(0))?;

    if images.len() < MIN_IMAGES {
        return Err(bad_request_count(images.len()));
    }
    if images.len() > MAX_IMAGES {
        return Err(ApiError::BadRequest(format!(
            "A maximum of {MAX_IMAGES} images is supported"
        )));
    }

    let mut payloads = Vec::with_capacity(images.len());
    for entry in images {
        match entry.as_str() {
            Some(payload) => payloads.push(payload.to_string()),
            None => {
                return Err(ApiError::BadRequest(
                    "Every image must be a base64 string".to_string(),
                ))
            }
        }
    }

    log::info!("[API] Analyze request: {} images", payloads.len());
    match state.gateway.analyze(&payloads).await {
        Ok(report) => Ok(Json(json!({ "success": true, "data": report }))),
        Err(err) => {
            log::error!("[API] Analysis failed: {err}");
            Err(ApiError::from_analysis(err, state.expose_error_detail))
        }
    }
}

fn bad_request_count(got: usize) -> ApiError {
    log::warn!("[API] Rejected analyze request — {got} images");
    ApiError::BadRequest(format!("Please upload at least {MIN_IMAGES} screenshots"))
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "MomentTrace API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
