//! User repository — CRUD operations for user accounts.

use chirpy_common::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user account.
pub async fn create_user(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, hashed_password, is_chirpy_red, created_at, updated_at)
        VALUES ($1, $2, $3, FALSE, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .fetch_one(pool)
    .await
}

/// Find a user by email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Replace a user's email and password hash.
pub async fn update_email_and_password(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    hashed_password: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            email = $2,
            hashed_password = $3,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .fetch_optional(pool)
    .await
}

/// Grant the Chirpy Red tier. Returns `false` if no such user exists.
pub async fn upgrade_to_chirpy_red(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET is_chirpy_red = TRUE, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every user. Chirps and refresh tokens go with them via cascade.
pub async fn delete_all_users(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(result.rows_affected())
}
