pub mod api;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status/summary", get(api::handle_status_summary))
        .route("/api/status/nodes", get(api::handle_status_nodes))
        .route("/api/status/config", get(api::handle_status_config))
        .route("/healthz", get(api::handle_healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
