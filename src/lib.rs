//! MomentTrace — library crate root.
//!
//! Upload a batch of social-feed screenshots, get a structured
//! personality/compatibility report from a multimodal model.
//!
//! No business logic lives here — only module declarations and the shared
//! application state. The pipeline is split across:
//!   - intake/    — bounded, validated image batch (all input channels)
//!   - session.rs — collect → analyze → present state machine
//!   - llm/       — inference gateway, JSON recovery, report validation
//!   - api/       — HTTP boundary (axum routes)
//!   - config.rs  — environment configuration + provider-mode resolution
//!   - error.rs   — error taxonomy

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod intake;
pub mod llm;
pub mod session;

use config::AppConfig;
use llm::InferenceGateway;

/// Shared state handed to every request handler.
///
/// The gateway is stateless per request; sharing it shares only the
/// HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<InferenceGateway>,
    pub expose_error_detail: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let expose_error_detail = config.expose_error_detail();
        Self {
            gateway: Arc::new(InferenceGateway::new(config)),
            expose_error_detail,
        }
    }
}
