//! User model — the identity layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A Chirpy user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v7 — time-sortable)
    pub id: Uuid,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update to email or password
    pub updated_at: DateTime<Utc>,

    /// Login email, unique across accounts
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub hashed_password: String,

    /// Paid tier, granted by the Polka webhook
    pub is_chirpy_red: bool,
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 1024, message = "Password must not be empty"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Update email + password for the authenticated user
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 1024, message = "Password must not be empty"))]
    pub password: String,
}

/// Safe user representation for API responses (no sensitive fields)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            created_at: u.created_at,
            updated_at: u.updated_at,
            email: u.email,
            is_chirpy_red: u.is_chirpy_red,
        }
    }
}

/// Login response: the user plus a fresh token pair.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Access token (JWT)
    pub token: String,
    /// Opaque refresh token
    pub refresh_token: String,
}

/// Response to `POST /api/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            email: "walt@breakingbad.com".into(),
            hashed_password: "$argon2id$v=19$secret".into(),
            is_chirpy_red: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
    }

    #[test]
    fn login_response_is_flat() {
        let response = LoginResponse {
            user: UserResponse {
                id: Uuid::nil(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
                email: "saul@bettercall.com".into(),
                is_chirpy_red: true,
            },
            token: "jwt".into(),
            refresh_token: "abc".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["email"], "saul@bettercall.com");
        assert_eq!(json["is_chirpy_red"], true);
        assert_eq!(json["token"], "jwt");
        assert_eq!(json["refresh_token"], "abc");
    }
}
