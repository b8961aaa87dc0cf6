//! Chirp repository.

use chirpy_common::models::chirp::{Chirp, SortOrder};
use sqlx::PgPool;
use uuid::Uuid;

/// Store a chirp. `body` must already be validated and filtered.
pub async fn create_chirp(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    body: &str,
) -> Result<Chirp, sqlx::Error> {
    sqlx::query_as::<_, Chirp>(
        r#"
        INSERT INTO chirps (id, body, user_id, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(body)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Find a chirp by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Chirp>, sqlx::Error> {
    sqlx::query_as::<_, Chirp>("SELECT * FROM chirps WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List chirps by creation time, optionally only those by `author`.
pub async fn list_chirps(
    pool: &PgPool,
    author: Option<Uuid>,
    order: SortOrder,
) -> Result<Vec<Chirp>, sqlx::Error> {
    // Direction comes from a closed enum, never from user input
    let sql = format!(
        "SELECT * FROM chirps WHERE ($1::uuid IS NULL OR user_id = $1) ORDER BY created_at {}, id {}",
        order.as_sql(),
        order.as_sql(),
    );
    sqlx::query_as::<_, Chirp>(&sql)
        .bind(author)
        .fetch_all(pool)
        .await
}

/// Delete a chirp. Returns `false` if it did not exist.
pub async fn delete_chirp(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
