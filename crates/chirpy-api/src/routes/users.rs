//! User routes — account creation and credential updates.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chirpy_common::{
    auth::hash_password,
    error::{ChirpyError, ChirpyResult},
    models::user::{CreateUserRequest, UpdateUserRequest, UserResponse},
    snowflake,
    validation::validate_request,
};
use chirpy_db::repository::users;
use std::sync::Arc;

use crate::{
    middleware::{AuthContext, JsonBody},
    AppState,
};

/// User routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user).put(update_current_user))
}

/// POST /api/users — Create an account.
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> ChirpyResult<(StatusCode, Json<UserResponse>)> {
    validate_request(&body)?;

    let hashed_password = hash_password(&body.password)?;
    let user = users::create_user(
        &state.db.pg,
        snowflake::generate_id(),
        &body.email,
        &hashed_password,
    )
    .await
    .map_err(|e| ChirpyError::from_unique_violation(e, "Email"))?;

    tracing::info!(user_id = %user.id, "New user registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users — Replace the authenticated user's email and password.
async fn update_current_user(
    auth: AuthContext,
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> ChirpyResult<Json<UserResponse>> {
    validate_request(&body)?;

    let hashed_password = hash_password(&body.password)?;
    let user = users::update_email_and_password(
        &state.db.pg,
        auth.user_id,
        &body.email,
        &hashed_password,
    )
    .await
    // Another account already owns the email
    .map_err(|e| ChirpyError::from_unique_violation(e, "Email"))?
    .ok_or_else(|| ChirpyError::not_found("User"))?;

    tracing::info!(user_id = %user.id, "User credentials updated");

    Ok(Json(user.into()))
}
