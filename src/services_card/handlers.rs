use super::models::{DidQuery, ServicesCardPayload};
use super::services::ServicesCardService;
use crate::auth::{AuthedClient, DELETE_SERVICES_CARD, READ_SERVICES_CARD, WRITE_SERVICES_CARD};
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

async fn service(state: &Arc<RwLock<AppState>>) -> ServicesCardService {
    let app_state = state.read().await;
    ServicesCardService::new(app_state.db.clone(), app_state.clock.clone())
}

// ============================================================================
// Services Card Handlers
// ============================================================================

/// GET /api/v1/servicescard/:id
pub async fn get_services_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(READ_SERVICES_CARD)?;

    let card = service(&state).await.get_by_id(&id).await?;

    Ok(Json(card))
}

/// GET /api/v1/servicescard?did=...
pub async fn find_services_card_by_did(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
    Query(query): Query<DidQuery>,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(READ_SERVICES_CARD)?;

    let card = service(&state).await.find_by_did(&query.did).await?;

    Ok(Json(card))
}

/// POST /api/v1/servicescard
pub async fn create_services_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
    Json(payload): Json<ServicesCardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(WRITE_SERVICES_CARD)?;

    let card = service(&state).await.create(payload, &client.id).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/v1/servicescard
pub async fn update_services_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
    Json(payload): Json<ServicesCardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(WRITE_SERVICES_CARD)?;

    let card = service(&state).await.update(payload, &client.id).await?;

    Ok(Json(card))
}

/// DELETE /api/v1/servicescard/:id
pub async fn delete_services_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    client: AuthedClient,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    client.require_scope(DELETE_SERVICES_CARD)?;

    service(&state).await.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
