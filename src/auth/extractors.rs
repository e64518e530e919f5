//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::claims::{Claims, ALL_SCOPES};
use crate::common::{ApiError, AppState};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("missing Authorization header")]
    Missing,

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("missing required scope: {0}")]
    InsufficientScope(String),
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Missing => ApiError::Unauthorized("missing auth".into()),
            TokenError::Invalid(_) => ApiError::Unauthorized("invalid token".into()),
            TokenError::InsufficientScope(scope) => {
                ApiError::Forbidden(format!("scope {} required", scope))
            }
        }
    }
}

/// Authenticated API client extractor
///
/// Validates the bearer token and exposes the scopes it grants. Handlers
/// call [`AuthedClient::require_scope`] for the scope their route needs.
#[derive(Debug)]
pub struct AuthedClient {
    pub id: String,
    pub scopes: HashSet<String>,
}

impl AuthedClient {
    pub fn require_scope(&self, scope: &str) -> Result<(), ApiError> {
        if self.scopes.contains(scope) {
            Ok(())
        } else {
            warn!(client_id = %self.id, scope = %scope, "Request rejected: missing scope");
            Err(TokenError::InsufficientScope(scope.to_string()).into())
        }
    }

    fn all_scopes(id: String) -> Self {
        Self {
            id,
            scopes: ALL_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Decodes an HS256 token (with or without the `Bearer ` prefix)
pub fn decode_client(token: &str, secret: &str) -> Result<AuthedClient, TokenError> {
    let bare_token = token.strip_prefix("Bearer ").unwrap_or(token);

    let decoded = decode::<Claims>(
        bare_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    let scopes = decoded
        .claims
        .scope
        .split_whitespace()
        .map(str::to_string)
        .collect();

    Ok(AuthedClient {
        id: decoded.claims.sub,
        scopes,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedClient
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let (dev_mode, jwt_secret) = {
            let app_state = state_lock.read().await;
            (app_state.dev_mode.clone(), app_state.jwt_secret.clone())
        };

        // DEV MODE: every scope granted
        if dev_mode.is_enabled() {
            debug!(client_id = %dev_mode.client_id, "DEV MODE: authentication bypassed");
            return Ok(AuthedClient::all_scopes(dev_mode.client_id));
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                warn!("Authentication failed: missing Authorization header");
                TokenError::Missing
            })?;

        let client = decode_client(token, &jwt_secret).map_err(|e| {
            warn!(error = %e, "JWT token validation failed");
            e
        })?;

        debug!(client_id = %client.id, scopes = ?client.scopes, "Client authenticated");
        Ok(client)
    }
}
