//! Authentication primitives shared by every Chirpy surface.
//!
//! Everything here is synchronous and stateless: password hashing, access
//! token issue/validation, refresh token generation and lifecycle, and
//! `Authorization` header parsing. None of it writes HTTP responses; callers
//! map [`AuthError`] through [`ChirpyError`](crate::error::ChirpyError).

pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh_token;

pub use header::{get_api_key, get_bearer_token};
pub use jwt::{issue_access_token, validate_access_token, Claims, TOKEN_ISSUER};
pub use password::{hash_password, verify_password, DUMMY_PASSWORD_HASH};
pub use refresh_token::{generate_refresh_token, RefreshTokenState};

/// Failures raised by the auth primitives.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header is malformed")]
    MalformedHeader,

    /// Bad signature, wrong issuer, malformed subject, or expired.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Incorrect email or password")]
    PasswordMismatch,

    #[error("Password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Random token generation failed: {0}")]
    Randomness(rand_core::Error),
}

impl AuthError {
    /// True when the caller presented bad credentials (401), false when an
    /// underlying primitive broke (500).
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader | Self::MalformedHeader | Self::InvalidToken | Self::PasswordMismatch
        )
    }
}
