use super::handlers;
use axum::{routing::get, Router};

/// Creates the read-only code table router
pub fn codes_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/servicescard/gender-codes",
            get(handlers::get_gender_codes),
        )
        .route(
            "/api/v1/servicescard/data-source-codes",
            get(handlers::get_data_source_codes),
        )
}
