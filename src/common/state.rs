// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::common::clock::Clock;
use crate::common::dev_mode::DevModeConfig;

/// Application state containing database pool, clock, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub clock: Arc<dyn Clock>,
    pub jwt_secret: String,
    pub dev_mode: DevModeConfig,
}
