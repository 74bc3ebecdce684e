//! Route definitions for the costing service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Costing records
        .nest("/costings", costing_routes())
}

/// Costing routes
fn costing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_costings).post(handlers::create_costing))
        .route("/preview", post(handlers::preview_costing))
        .route(
            "/:record_id",
            get(handlers::get_costing)
                .put(handlers::replace_costing)
                .patch(handlers::update_costing)
                .delete(handlers::delete_costing),
        )
        .route("/:record_id/changes", post(handlers::apply_costing_changes))
        .route("/:record_id/recalculate", post(handlers::recalculate_costing))
}
