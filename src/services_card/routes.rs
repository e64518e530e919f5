use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates the services card router
pub fn services_card_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/servicescard",
            post(handlers::create_services_card)
                .put(handlers::update_services_card)
                .get(handlers::find_services_card_by_did),
        )
        .route(
            "/api/v1/servicescard/:id",
            get(handlers::get_services_card).delete(handlers::delete_services_card),
        )
}
