// src/main.rs
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod app;
mod auth;
mod codes;
mod common;
mod logging_middleware;
mod services_card;

use common::dev_mode::{apply_cli_override, log_dev_mode_status, DevModeConfig};
use common::{AppState, SystemClock};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://services_card.db".to_string());
    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET not set, using an insecure default");
        "replace_with_strong_secret".to_string()
    });

    let dev_mode = apply_cli_override(DevModeConfig::from_env());
    log_dev_mode_status(&dev_mode);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        clock: Arc::new(SystemClock),
        jwt_secret,
        dev_mode,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());
    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let app = app::build_router(shared, origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
