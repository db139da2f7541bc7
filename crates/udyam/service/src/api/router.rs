//! API router configuration.

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the service router.
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/schema", get(handlers::get_schema))
        .route("/api/submit-step", post(handlers::submit_step))
        .route(
            "/api/registrations/:id",
            get(handlers::get_registration)
                .put(handlers::update_registration)
                .delete(handlers::delete_registration),
        )
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}
