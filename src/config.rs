//! Environment configuration and provider-mode resolution.
//!
//! All configuration comes from the environment (loaded from `.env.local` /
//! `.env` by the binary before this runs):
//! - `ARK_API_KEY`      — external-provider credential
//! - `ARK_MODEL`        — provider model / endpoint identifier
//! - `ARK_BASE_URL`     — chat-completions endpoint override
//! - `PORT`             — listening port (default 3000)
//! - `APP_ENV`          — "production" hides error detail in API responses
//!
//! Whether the gateway calls the real provider is decided HERE, once, as an
//! explicit mode — never implicitly at call time. A missing credential selects
//! reference mode and is logged loudly so placeholder data can't ship quietly.

/// Default Ark (Volcengine) OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3/chat/completions";

/// Default vision model when `ARK_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "doubao-1-5-vision-pro-32k-250115";

const DEFAULT_PORT: u16 = 3000;

/// How the gateway obtains a report.
#[derive(Debug, Clone)]
pub enum ProviderMode {
    /// Call the external model with this credential.
    Live { api_key: String },
    /// Return the canned reference report — no external call.
    Reference,
}

/// Deployment environment, controls error-detail exposure on the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderMode,
    pub model: String,
    pub base_url: String,
    pub port: u16,
    pub environment: Environment,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Never fails: every value has a default, and a missing/placeholder
    /// credential resolves to `ProviderMode::Reference`.
    pub fn from_env() -> Self {
        let provider = match std::env::var("ARK_API_KEY") {
            Ok(key) if !key.trim().is_empty() && key != "your-api-key-here" => {
                log::info!("[CONFIG] Provider mode: live ({} char credential)", key.len());
                ProviderMode::Live { api_key: key }
            }
            _ => {
                log::warn!(
                    "[CONFIG] No ARK_API_KEY set — provider mode: reference (placeholder reports)"
                );
                ProviderMode::Reference
            }
        };

        let model = std::env::var("ARK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("ARK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        Self {
            provider,
            model,
            base_url,
            port,
            environment,
        }
    }

    /// Build a configuration for the reference (no-credential) path.
    /// Used by tests and demos; identical to what `from_env` resolves when
    /// no credential is present.
    pub fn reference() -> Self {
        Self {
            provider: ProviderMode::Reference,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
        }
    }

    /// Should API responses carry internal error detail?
    pub fn expose_error_detail(&self) -> bool {
        self.environment != Environment::Production
    }
}
