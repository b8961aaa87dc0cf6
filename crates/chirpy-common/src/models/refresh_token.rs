//! Refresh token rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::RefreshTokenState;

/// A persisted refresh token.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RefreshToken {
    /// The token itself (64 hex chars), also the primary key
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Set once by `POST /api/revoke`
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        RefreshTokenState::evaluate(self.expires_at, self.revoked_at, now)
    }

    pub fn state(&self) -> RefreshTokenState {
        self.state_at(Utc::now())
    }
}
