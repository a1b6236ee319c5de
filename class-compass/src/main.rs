use std::process::ExitCode;

use class_compass::config::AppConfig;
use class_compass::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("class_compass=info,tower_http=info")),
        )
        .init();

    // Fail fast: without an API key every travel time would be unavailable
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("startup error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(proxy) = &config.proxy_url {
        info!(%proxy, "resolving travel times through remote distance proxy");
    }
    if config.uses_custom_provider() {
        info!(base_url = %config.maps.base_url, "using custom distance-matrix endpoint");
    }

    let app = create_router(state, &config.public_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Class Compass listening on http://{}", config.addr);
    info!("  GET  /                      - Schedule page");
    info!("  GET  /distance              - Distance proxy");
    info!("  GET  /api/schedule          - Schedule with travel times");
    info!("  POST /api/schedule          - Add a class");
    info!("  DEL  /api/schedule/:index   - Remove a class");
    info!(public_dir = %config.public_dir.display(), "serving static assets");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
