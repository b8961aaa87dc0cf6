//! Middleware and extractors — credential extraction, webhook auth, body
//! parsing, hit counting.

use axum::{
    extract::{FromRequest, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use chirpy_common::{
    auth::{get_api_key, get_bearer_token, validate_access_token},
    error::ChirpyError,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;

/// `axum::Json` whose rejections use the `ChirpyError` JSON envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ChirpyError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejections use the `ChirpyError` JSON envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ChirpyError))]
pub struct PathParam<T>(pub T);

/// Raw credential from `Authorization: Bearer <token>`, not yet validated.
///
/// Used by the refresh/revoke endpoints, where the credential is an opaque
/// refresh token looked up in storage.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ChirpyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(get_bearer_token(&parts.headers)?))
    }
}

/// Authentication context for requests carrying a valid access token.
///
/// Usage in handlers:
/// ```rust,ignore
/// async fn my_handler(auth: AuthContext) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl FromRequestParts<Arc<AppState>> for AuthContext {
    type Rejection = ChirpyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let user_id = validate_access_token(&token, &state.config.auth.jwt_secret)
            .inspect_err(|e| {
                tracing::debug!(path = %parts.uri.path(), "Rejected access token: {e}");
            })?;
        Ok(Self { user_id })
    }
}

/// Marker extractor: the request carries the configured Polka API key.
#[derive(Debug, Clone, Copy)]
pub struct PolkaAuthorized;

impl FromRequestParts<Arc<AppState>> for PolkaAuthorized {
    type Rejection = ChirpyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let key = get_api_key(&parts.headers)?;
        if key != state.config.polka.api_key {
            tracing::warn!("Rejected webhook call with unknown API key");
            return Err(ChirpyError::Unauthorized);
        }
        Ok(Self)
    }
}

/// Count every request passing through; mounted on the static app.
pub async fn count_hits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.increment();
    next.run(request).await
}
