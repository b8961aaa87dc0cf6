//! Access tokens: HS256-signed JWTs bound to a user id.
//!
//! Access tokens are stateless. They stay valid until `exp`; there is no
//! revocation list, which is what refresh tokens are for.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;

/// Value of the `iss` claim on every token Chirpy issues.
pub const TOKEN_ISSUER: &str = "chirpy";

/// JWT claims embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer, always [`TOKEN_ISSUER`]
    pub iss: String,
    /// Subject (user ID as string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issue an access token for `user_id` that expires `ttl` from now.
pub fn issue_access_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, AuthError> {
    issue_access_token_at(user_id, secret, Utc::now(), ttl)
}

/// Issue an access token as if it were minted at `issued_at`.
pub fn issue_access_token_at(
    user_id: Uuid,
    secret: &str,
    issued_at: DateTime<Utc>,
    ttl: Duration,
) -> Result<String, AuthError> {
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation
}

/// Verify signature, issuer and expiry, and return the raw claims.
///
/// A token is valid strictly before `exp`.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let claims =
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                AuthError::InvalidToken
            })?;

    // jsonwebtoken only rejects `exp < now`
    if claims.exp <= Utc::now().timestamp() {
        tracing::debug!(exp = claims.exp, "Rejected access token at expiry");
        return Err(AuthError::InvalidToken);
    }

    Ok(claims)
}

/// Validate an access token and return the user id it was issued for.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let claims = decode_claims(token, secret)?;
    claims.sub.parse::<Uuid>().map_err(|_| {
        tracing::debug!(sub = %claims.sub, "Access token subject is not a user id");
        AuthError::InvalidToken
    })
}
