// src/app.rs
//! Router composition shared by the server and the HTTP tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::common::AppState;
use crate::{codes, logging_middleware, services_card};

pub fn build_router(state: Arc<RwLock<AppState>>, cors_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(services_card::services_card_routes())
        .merge(codes::codes_routes())
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::{Claims, ALL_SCOPES};
    use crate::auth::{READ_SERVICES_CARD, WRITE_SERVICES_CARD};
    use crate::common::dev_mode::DevModeConfig;
    use crate::common::migrations::run_migrations;
    use crate::common::FixedClock;
    use crate::services_card::models::ServicesCard;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    const SECRET: &str = "router_test_secret";

    async fn test_router() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations");

        let state = AppState {
            db: pool,
            clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())),
            jwt_secret: SECRET.to_string(),
            dev_mode: DevModeConfig {
                enabled: false,
                client_id: String::new(),
            },
        };

        build_router(Arc::new(RwLock::new(state)), Vec::new())
    }

    fn bearer(scope: &str) -> String {
        let claims = Claims {
            sub: "router-test".to_string(),
            exp: 9999999999,
            scope: scope.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode token");
        format!("Bearer {}", token)
    }

    fn create_request(scope: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/servicescard")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, bearer(scope))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "pen": "123456789",
            "email": "abc@gmail.com",
            "gender_code": "F",
            "data_source_code": "BCSC"
        })
    }

    #[tokio::test]
    async fn test_create_returns_created_and_delete_returns_no_content() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(create_request(&ALL_SCOPES.join(" "), valid_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let card: ServicesCard = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(card.create_user, "router-test");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/servicescard/{}", card.services_card_id))
                    .header(header::AUTHORIZATION, bearer(&ALL_SCOPES.join(" ")))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_create_without_write_scope_is_forbidden() {
        let app = test_router().await;

        let response = app
            .oneshot(create_request(READ_SERVICES_CARD, valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_request_without_token_is_unauthorized() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/servicescard/gender-codes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_payload_lists_field_errors() {
        let app = test_router().await;
        let mut body = valid_body();
        body["gender_code"] = json!("");

        let response = app
            .oneshot(create_request(WRITE_SERVICES_CARD, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["sub_errors"].as_array().map(Vec::len), Some(1));
        assert_eq!(error["sub_errors"][0]["field"], "gender_code");
        assert_eq!(error["timestamp"], "2024-06-01T12:00:00+00:00");
    }
}
