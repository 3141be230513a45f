//! Axum router configuration with middleware.
//!
//! All session routes are under `/api/v1/`; `/health` sits at the root.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/code", post(handlers::session::submit_code))
        .route(
            "/sessions/{id}/feedback",
            post(handlers::session::submit_feedback),
        )
        .route("/sessions/{id}/finalize", post(handlers::session::finalize))
        .route("/sessions/{id}/report", get(handlers::session::get_report));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
