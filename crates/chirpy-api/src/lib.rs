//! # chirpy-api
//!
//! REST API layer for Chirpy. Provides the HTTP endpoints for accounts,
//! tokens, chirps, the Polka webhook, admin metrics, and the static app.

pub mod middleware;
pub mod routes;

use axum::Router;
use chirpy_common::{config::AppConfig, metrics::HitCounter};
use chirpy_db::Database;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Shared application state available to all route handlers.
pub struct AppState {
    pub db: Database,
    /// Snapshot of the configuration taken at startup.
    pub config: AppConfig,
    /// Requests served under `/app/` since start or last reset.
    pub hits: HitCounter,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self {
            db,
            config,
            hits: HitCounter::new(),
        }
    }
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .merge(routes::auth::router())
        .merge(routes::chirps::router())
        .merge(routes::webhooks::router());

    // Static app; every request counts toward /admin/metrics
    let app_routes = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.server.filepath_root))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::count_hits,
        ));

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", routes::admin::router())
        .merge(app_routes)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
