//! Refresh tokens: opaque random strings persisted by the repository layer.
//!
//! A token moves from `Active` to either `Expired` or `Revoked` and never
//! comes back.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::Serialize;

use super::AuthError;

/// Number of random bytes behind each refresh token (64 hex chars).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a refresh token from the OS CSPRNG, lowercase hex encoded.
pub fn generate_refresh_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(AuthError::Randomness)?;
    Ok(hex::encode(bytes))
}

/// Where a stored refresh token sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTokenState {
    Active,
    Expired,
    Revoked,
}

impl RefreshTokenState {
    /// Classify a token from its stored timestamps. Revocation wins over expiry.
    pub fn evaluate(
        expires_at: DateTime<Utc>,
        revoked_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if revoked_at.is_some() {
            Self::Revoked
        } else if now > expires_at {
            Self::Expired
        } else {
            Self::Active
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_64_lowercase_hex_chars() {
        let token = generate_refresh_token().unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn ten_thousand_tokens_never_collide() {
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| generate_refresh_token().unwrap())
            .collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn fresh_token_is_active() {
        let now = Utc::now();
        let state = RefreshTokenState::evaluate(now + Duration::days(60), None, now);
        assert_eq!(state, RefreshTokenState::Active);
        assert!(state.is_active());
    }

    #[test]
    fn revoked_token_is_rejected_before_expiry() {
        let now = Utc::now();
        let state = RefreshTokenState::evaluate(
            now + Duration::days(30),
            Some(now - Duration::minutes(1)),
            now,
        );
        assert_eq!(state, RefreshTokenState::Revoked);
        assert!(!state.is_active());
    }

    #[test]
    fn expired_token_is_rejected_without_revocation() {
        let now = Utc::now();
        let state = RefreshTokenState::evaluate(now - Duration::seconds(1), None, now);
        assert_eq!(state, RefreshTokenState::Expired);
        assert!(!state.is_active());
    }

    #[test]
    fn expiry_instant_itself_is_still_active() {
        let now = Utc::now();
        assert!(RefreshTokenState::evaluate(now, None, now).is_active());
    }
}
