//! Chirp routes — post, list, fetch, delete.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chirpy_common::{
    error::{ChirpyError, ChirpyResult},
    models::chirp::{Chirp, CreateChirpRequest, ListChirpsParams, SortOrder},
    profanity, snowflake,
    validation::validate_request,
};
use chirpy_db::repository::chirps;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{AuthContext, JsonBody, PathParam},
    AppState,
};

/// Chirp routes. Reads are public; writes need an access token.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chirps", get(list_chirps).post(create_chirp))
        .route("/chirps/{chirp_id}", get(get_chirp).delete(delete_chirp))
}

/// POST /api/chirps — Post a chirp as the authenticated user.
async fn create_chirp(
    auth: AuthContext,
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateChirpRequest>,
) -> ChirpyResult<(StatusCode, Json<Chirp>)> {
    validate_request(&body)?;

    let cleaned = profanity::clean_body(&body.body);
    let chirp = chirps::create_chirp(
        &state.db.pg,
        snowflake::generate_id(),
        auth.user_id,
        &cleaned,
    )
    .await?;

    tracing::debug!(chirp_id = %chirp.id, user_id = %auth.user_id, "Chirp created");

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
async fn list_chirps(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListChirpsParams>,
) -> ChirpyResult<Json<Vec<Chirp>>> {
    let author = parse_author(params.author_id.as_deref())?;
    let order = SortOrder::from_query(params.sort.as_deref());

    let chirps = chirps::list_chirps(&state.db.pg, author, order).await?;
    Ok(Json(chirps))
}

fn parse_author(raw: Option<&str>) -> ChirpyResult<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id.parse::<Uuid>().map(Some).map_err(|_| ChirpyError::Validation {
            message: "author_id must be a valid UUID".into(),
        }),
    }
}

/// GET /api/chirps/{chirp_id}
async fn get_chirp(
    State(state): State<Arc<AppState>>,
    PathParam(chirp_id): PathParam<Uuid>,
) -> ChirpyResult<Json<Chirp>> {
    let chirp = chirps::find_by_id(&state.db.pg, chirp_id)
        .await?
        .ok_or_else(|| ChirpyError::not_found("Chirp"))?;

    Ok(Json(chirp))
}

/// DELETE /api/chirps/{chirp_id} — Only the author may delete.
async fn delete_chirp(
    auth: AuthContext,
    State(state): State<Arc<AppState>>,
    PathParam(chirp_id): PathParam<Uuid>,
) -> ChirpyResult<StatusCode> {
    let chirp = chirps::find_by_id(&state.db.pg, chirp_id)
        .await?
        .ok_or_else(|| ChirpyError::not_found("Chirp"))?;

    if chirp.user_id != auth.user_id {
        return Err(ChirpyError::Forbidden);
    }

    if !chirps::delete_chirp(&state.db.pg, chirp_id).await? {
        // Lost a race with another delete
        return Err(ChirpyError::not_found("Chirp"));
    }

    tracing::debug!(%chirp_id, user_id = %auth.user_id, "Chirp deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get, json, router, send, JWT_SECRET};
    use chirpy_common::auth::jwt::issue_access_token_at;
    use chirpy_common::auth::issue_access_token;
    use chrono::{Duration, Utc};

    fn bearer(user_id: Uuid) -> String {
        let token = issue_access_token(user_id, JWT_SECRET, Duration::hours(1)).unwrap();
        format!("Bearer {token}")
    }

    #[test]
    fn author_filter_parsing() {
        assert_eq!(parse_author(None).unwrap(), None);
        assert_eq!(parse_author(Some("")).unwrap(), None);
        let id = Uuid::now_v7();
        assert_eq!(parse_author(Some(&id.to_string())).unwrap(), Some(id));
        assert!(parse_author(Some("jesse")).is_err());
    }

    #[tokio::test]
    async fn posting_requires_a_token() {
        let app = router("prod");
        let (status, body) =
            send(&app, json("POST", "/api/chirps", None, r#"{"body":"hello"}"#)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("MISSING_AUTHORIZATION"));
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let token = issue_access_token(Uuid::now_v7(), "other-secret", Duration::hours(1)).unwrap();
        let app = router("prod");
        let (status, body) = send(
            &app,
            json("POST", "/api/chirps", Some(&format!("Bearer {token}")), r#"{"body":"hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("INVALID_TOKEN"));
    }

    #[tokio::test]
    async fn overlong_chirp_is_rejected() {
        let app = router("prod");
        let payload = serde_json::json!({ "body": "x".repeat(141) }).to_string();
        let (status, body) = send(
            &app,
            json("POST", "/api/chirps", Some(&bearer(Uuid::now_v7())), &payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Chirp is too long"));
    }

    #[tokio::test]
    async fn delete_with_expired_token_is_unauthorized() {
        let issued = Utc::now() - Duration::hours(3);
        let token =
            issue_access_token_at(Uuid::now_v7(), JWT_SECRET, issued, Duration::hours(1)).unwrap();
        let app = router("prod");
        let uri = format!("/api/chirps/{}", Uuid::now_v7());
        let (status, _) = send(
            &app,
            json("DELETE", &uri, Some(&format!("Bearer {token}")), ""),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn multibyte_chirp_over_the_byte_limit_is_rejected() {
        let app = router("prod");
        // 100 chars, 200 bytes
        let payload = serde_json::json!({ "body": "é".repeat(100) }).to_string();
        let (status, body) = send(
            &app,
            json("POST", "/api/chirps", Some(&bearer(Uuid::now_v7())), &payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Chirp is too long"));
    }

    #[tokio::test]
    async fn malformed_chirp_id_uses_error_envelope() {
        let app = router("prod");
        let (status, body) = send(&app, get("/api/chirps/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"), "{body}");
    }

    #[tokio::test]
    async fn malformed_author_filter_is_bad_request() {
        let app = router("prod");
        let (status, body) = send(&app, get("/api/chirps?author_id=not-a-uuid&sort=desc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("author_id"));
    }
}
