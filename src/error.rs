//! Error types for the analysis pipeline and the HTTP boundary.
//!
//! `AnalysisError` is the gateway-side taxonomy: input-shape violations,
//! transport failures, and model-output recovery failures. `ApiError` maps
//! those onto the wire contract (`{success: false, message, error?}`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of a single analysis attempt.
///
/// None of these are retried automatically — the session surfaces them and
/// returns to collecting.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Batch bounds violated before any external call was made.
    #[error("batch must contain between 5 and 20 images, got {count}")]
    InvalidBatchSize { count: usize },

    /// Network or HTTP-level failure talking to the provider.
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Provider answered 200 but the completion text was empty.
    #[error("provider returned an empty completion")]
    EmptyCompletion,

    /// No JSON object could be located in the completion text.
    #[error("no JSON object found in model output: {excerpt}")]
    NoJsonFound { excerpt: String },

    /// A JSON object was located but failed to parse or deserialize.
    #[error("model output JSON is malformed: {detail} (excerpt: {excerpt})")]
    MalformedJson { detail: String, excerpt: String },

    /// A required top-level report section is absent.
    #[error("report is missing required field: {path}")]
    MissingField { path: String },
}

/// HTTP-boundary error. Serialized exactly as the clients expect:
/// `{success: false, message, error?}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 — the caller can fix the request and retry.
    BadRequest(String),
    /// 500 — `detail` is only populated outside production mode.
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Map a failed analysis onto the wire contract.
    ///
    /// Batch-bound violations are the caller's fault (400); everything else
    /// is reported as an internal failure with detail gated on `expose_detail`.
    pub fn from_analysis(err: AnalysisError, expose_detail: bool) -> Self {
        match err {
            AnalysisError::InvalidBatchSize { .. } => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Internal {
                message: "Analysis failed, please try again later".to_string(),
                detail: expose_detail.then(|| err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            ApiError::Internal { message, detail } => {
                let mut body = json!({ "success": false, "message": message });
                if let Some(detail) = detail {
                    body["error"] = json!(detail);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
