//! Health check endpoint — for load balancers and Docker health checks.

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

/// Health check router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(health_check))
}

/// GET /api/healthz
async fn health_check() -> &'static str {
    "OK"
}
