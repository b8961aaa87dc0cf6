//! Refresh token repository.
//!
//! Rows are written at login, read at refresh, and only ever mutated to set
//! `revoked_at`.

use chirpy_common::models::refresh_token::RefreshToken;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Persist a freshly generated refresh token.
pub async fn create_refresh_token(
    pool: &PgPool,
    token: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<RefreshToken, sqlx::Error> {
    sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (token, user_id, expires_at, revoked_at, created_at, updated_at)
        VALUES ($1, $2, $3, NULL, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Look up a refresh token regardless of its state.
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<RefreshToken>, sqlx::Error> {
    sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await
}

/// Mark a token revoked. Returns `false` if the token does not exist.
///
/// Revoking twice keeps the original `revoked_at`.
pub async fn revoke_refresh_token(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE refresh_tokens SET
            revoked_at = COALESCE(revoked_at, NOW()),
            updated_at = NOW()
        WHERE token = $1
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
