use super::services::SqliteCodeTableService;
use crate::auth::{AuthedClient, READ_SERVICES_CARD_CODES};
use crate::common::{ApiError, AppState};
use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/v1/servicescard/gender-codes
pub async fn get_gender_codes(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(READ_SERVICES_CARD_CODES)?;

    let db = state.read().await.db.clone();
    let codes = SqliteCodeTableService::new(db).list_gender_codes().await?;

    Ok(Json(codes))
}

/// GET /api/v1/servicescard/data-source-codes
pub async fn get_data_source_codes(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(READ_SERVICES_CARD_CODES)?;

    let db = state.read().await.db.clone();
    let codes = SqliteCodeTableService::new(db)
        .list_data_source_codes()
        .await?;

    Ok(Json(codes))
}
