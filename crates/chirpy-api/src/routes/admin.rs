//! Admin routes — hit metrics and development reset.

use axum::{extract::State, http::StatusCode, response::Html, routing::{get, post}, Router};
use chirpy_common::error::{ChirpyError, ChirpyResult};
use chirpy_db::repository::users;
use std::sync::Arc;

use crate::AppState;

/// Admin router, mounted under `/admin`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metrics", get(metrics_page))
        .route("/reset", post(reset))
}

/// GET /admin/metrics
async fn metrics_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.hits.load()
    ))
}

/// POST /admin/reset
///
/// Always zeroes the hit counter. Wiping users (and, by cascade, chirps and
/// refresh tokens) is only allowed on the `dev` platform.
async fn reset(State(state): State<Arc<AppState>>) -> ChirpyResult<StatusCode> {
    state.hits.reset();

    if !state.config.server.is_dev() {
        return Err(ChirpyError::Forbidden);
    }

    let removed = users::delete_all_users(&state.db.pg).await?;
    tracing::warn!(removed, "Reset deleted all users");

    Ok(StatusCode::OK)
}
