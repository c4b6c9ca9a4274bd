pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers;

pub fn build_router(body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile view API
        .route("/api/v1/profile/view", post(handlers::handle_profile_view))
        .route(
            "/api/v1/profile/view/:category",
            post(handlers::handle_category_view),
        )
        // Single-operation API
        .route(
            "/api/v1/entries/structure",
            post(handlers::handle_structure_entry),
        )
        .route(
            "/api/v1/attributes/rank",
            post(handlers::handle_rank_attributes),
        )
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}
