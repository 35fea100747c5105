//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.

use axum::routing::{get, post};
use axum::Router;
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
        // Alert ingestion and reads
        .route(
            "/alerts/event/{provider}",
            post(handlers::alert::ingest_alerts),
        )
        .route("/alerts", get(handlers::alert::list_alerts))
        .route("/alerts/{fingerprint}", get(handlers::alert::get_alert))
        // Enrichment
        .route("/alerts/enrich", post(handlers::enrichment::enrich_alert))
        // Workflows
        .route(
            "/alerts/{fingerprint}/workflows",
            get(handlers::workflow::relevant_workflows),
        )
        .route("/workflows", get(handlers::workflow::list_workflows));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
