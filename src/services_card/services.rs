use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{OperationMode, ServicesCard, ServicesCardPayload};
use super::repository::{ServicesCardRepository, SqliteServicesCardRepository};
use super::validators::{ServicesCardPayloadValidator, ServicesCardRequestValidator};
use crate::codes::{CodeTableLookup, SqliteCodeTableService};
use crate::common::{mask_pen, safe_email_log, ApiError, Clock, Validator};

pub struct ServicesCardService {
    repository: Arc<dyn ServicesCardRepository>,
    validator: ServicesCardPayloadValidator,
    clock: Arc<dyn Clock>,
}

impl ServicesCardService {
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self::with_parts(
            Arc::new(SqliteServicesCardRepository::new(db.clone())),
            Arc::new(SqliteCodeTableService::new(db)),
            clock,
        )
    }

    pub fn with_parts<R>(
        repository: Arc<R>,
        codes: Arc<dyn CodeTableLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        R: ServicesCardRepository + 'static,
    {
        let validator = ServicesCardPayloadValidator::new(repository.clone(), codes, clock.clone());
        Self {
            repository,
            validator,
            clock,
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn get_by_id(&self, id: &str) -> Result<ServicesCard, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Services card {} not found", id)))
    }

    pub async fn find_by_did(&self, did: &str) -> Result<ServicesCard, ApiError> {
        self.repository
            .find_by_did(did)
            .await?
            .ok_or_else(|| ApiError::NotFound("No services card for the given DID".to_string()))
    }

    // ============================================================================
    // Commands
    // ============================================================================

    pub async fn create(
        &self,
        payload: ServicesCardPayload,
        actor: &str,
    ) -> Result<ServicesCard, ApiError> {
        self.validate(&payload, OperationMode::Create).await?;

        let now = self.clock.now().to_rfc3339();
        let card = build_card(
            Uuid::new_v4().to_string(),
            payload,
            actor.to_string(),
            now.clone(),
            actor,
            &now,
        );

        self.repository.insert(&card).await?;

        info!(
            services_card_id = %card.services_card_id,
            pen = %mask_pen(&card.pen),
            email = %card.email.as_deref().map(safe_email_log).unwrap_or_default(),
            "Created services card"
        );

        Ok(card)
    }

    pub async fn update(
        &self,
        payload: ServicesCardPayload,
        actor: &str,
    ) -> Result<ServicesCard, ApiError> {
        self.validate(&payload, OperationMode::Update).await?;

        // the request validator rejects a missing id in update mode
        let id = payload
            .services_card_id
            .clone()
            .ok_or_else(|| ApiError::BadRequest("services_card_id is required".to_string()))?;

        let existing = self.get_by_id(&id).await?;

        let now = self.clock.now().to_rfc3339();
        let card = build_card(
            id,
            payload,
            existing.create_user,
            existing.create_date,
            actor,
            &now,
        );

        self.repository.update(&card).await?;

        info!(services_card_id = %card.services_card_id, "Updated services card");

        Ok(card)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if !self.repository.delete(id).await? {
            return Err(ApiError::NotFound(format!("Services card {} not found", id)));
        }

        info!(services_card_id = %id, "Deleted services card");
        Ok(())
    }

    /// Structural and lookup errors are reported together
    async fn validate(
        &self,
        payload: &ServicesCardPayload,
        mode: OperationMode,
    ) -> Result<(), ApiError> {
        let structural = ServicesCardRequestValidator { mode }.validate(payload);

        self.validator
            .ensure_valid(payload, mode, structural)
            .await
            .map_err(|e| {
                if let ApiError::InvalidPayload(body) = &e {
                    debug!(
                        mode = ?mode,
                        fields = ?body.sub_errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                        "Services card payload rejected"
                    );
                }
                e
            })
    }
}

fn build_card(
    services_card_id: String,
    payload: ServicesCardPayload,
    create_user: String,
    create_date: String,
    update_user: &str,
    update_date: &str,
) -> ServicesCard {
    ServicesCard {
        services_card_id,
        did: payload.did,
        pen: payload.pen,
        email: payload.email,
        gender_code: payload.gender_code,
        data_source_code: payload.data_source_code,
        user_display_name: payload.user_display_name,
        given_name: payload.given_name,
        given_names: payload.given_names,
        surname: payload.surname,
        birth_date: payload.birth_date,
        identity_assurance_level: payload.identity_assurance_level,
        postal_code: payload.postal_code,
        create_user,
        create_date,
        update_user: update_user.to_string(),
        update_date: update_date.to_string(),
    }
}
