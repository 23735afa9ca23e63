//! MomentTrace server binary.
//!
//! Loads environment configuration, resolves the provider mode, and serves
//! the API.

use anyhow::Result;

use moment_trace::api;
use moment_trace::config::{AppConfig, ProviderMode};
use moment_trace::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local → .env from the project root. CARGO_MANIFEST_DIR is
    // resolved at compile time, so this works regardless of the binary's
    // working directory.
    let project_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    for env_file in [".env.local", ".env"] {
        let path = project_root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }

    env_logger::init();

    let config = AppConfig::from_env();
    let port = config.port;
    match &config.provider {
        ProviderMode::Live { .. } => log::info!("[STARTUP] Model: {}", config.model),
        ProviderMode::Reference => {
            log::warn!("[STARTUP] Serving placeholder reports — set ARK_API_KEY for live analysis")
        }
    }

    let state = AppState::new(config);
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("[STARTUP] MomentTrace listening on http://localhost:{port}");
    log::info!("[STARTUP] Health check: http://localhost:{port}/api/health");

    axum::serve(listener, app).await?;
    Ok(())
}
