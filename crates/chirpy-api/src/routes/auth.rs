//! Token routes — login, refresh, revoke.
//!
//! Login trades email + password for a short-lived access token and a
//! long-lived refresh token. The refresh token is then presented as a bearer
//! credential to mint new access tokens until it expires or is revoked.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chirpy_common::{
    auth::{
        generate_refresh_token, issue_access_token, verify_password, AuthError,
        DUMMY_PASSWORD_HASH,
    },
    error::{ChirpyError, ChirpyResult},
    models::user::{LoginRequest, LoginResponse, RefreshResponse},
    validation::validate_request,
};
use chirpy_db::repository::{refresh_tokens, users};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    middleware::{BearerToken, JsonBody},
    AppState,
};

/// Auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
}

/// POST /api/login
///
/// Authenticate with email + password. Unknown email and wrong password are
/// indistinguishable to the caller.
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ChirpyResult<Json<LoginResponse>> {
    validate_request(&body)?;

    let user = users::find_by_email(&state.db.pg, &body.email).await?;

    // Unknown emails still pay for a full Argon2 verification
    let stored_hash = user
        .as_ref()
        .map_or(DUMMY_PASSWORD_HASH, |u| u.hashed_password.as_str());
    let verified = verify_password(&body.password, stored_hash);
    let user = user.ok_or(AuthError::PasswordMismatch)?;
    verified?;

    let auth_config = &state.config.auth;
    let token = issue_access_token(user.id, &auth_config.jwt_secret, auth_config.access_token_ttl())?;

    let refresh_token = generate_refresh_token()?;
    refresh_tokens::create_refresh_token(
        &state.db.pg,
        &refresh_token,
        user.id,
        Utc::now() + auth_config.refresh_token_ttl(),
    )
    .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
///
/// Exchange an active refresh token for a new access token.
async fn refresh(
    State(state): State<Arc<AppState>>,
    BearerToken(refresh_token): BearerToken,
) -> ChirpyResult<Json<RefreshResponse>> {
    let stored = refresh_tokens::find_by_token(&state.db.pg, &refresh_token)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    let lifecycle = stored.state();
    if !lifecycle.is_active() {
        tracing::debug!(user_id = %stored.user_id, state = ?lifecycle, "Rejected refresh token");
        return Err(AuthError::InvalidToken.into());
    }

    let auth_config = &state.config.auth;
    let token = issue_access_token(
        stored.user_id,
        &auth_config.jwt_secret,
        auth_config.access_token_ttl(),
    )?;

    Ok(Json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke a refresh token. Access tokens minted from it stay valid until
/// they expire.
async fn revoke(
    State(state): State<Arc<AppState>>,
    BearerToken(refresh_token): BearerToken,
) -> ChirpyResult<StatusCode> {
    if !refresh_tokens::revoke_refresh_token(&state.db.pg, &refresh_token).await? {
        return Err(ChirpyError::not_found("Refresh token"));
    }

    tracing::info!("Refresh token revoked");
    Ok(StatusCode::NO_CONTENT)
}
