//! Polka billing webhook.
//!
//! Polka calls `POST /api/polka/webhooks` with `Authorization: ApiKey <key>`.
//! Only `user.upgraded` does anything; other events are acknowledged and
//! ignored so Polka stops retrying them.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use chirpy_common::{
    error::{ChirpyError, ChirpyResult},
    models::webhook::PolkaEvent,
};
use chirpy_db::repository::users;
use std::sync::Arc;

use crate::{
    middleware::{JsonBody, PolkaAuthorized},
    AppState,
};

/// Webhook routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/polka/webhooks", post(handle_polka_event))
}

/// POST /api/polka/webhooks
async fn handle_polka_event(
    _: PolkaAuthorized,
    State(state): State<Arc<AppState>>,
    JsonBody(event): JsonBody<PolkaEvent>,
) -> ChirpyResult<StatusCode> {
    if !event.is_user_upgraded() {
        tracing::debug!(event = %event.event, "Ignoring Polka event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = event.user_id().ok_or_else(|| ChirpyError::Validation {
        message: "data.user_id must be a valid UUID".into(),
    })?;
    if !users::upgrade_to_chirpy_red(&state.db.pg, user_id).await? {
        return Err(ChirpyError::not_found("User"));
    }

    tracing::info!(%user_id, "User upgraded to Chirpy Red");
    Ok(StatusCode::NO_CONTENT)
}
