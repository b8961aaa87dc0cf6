//! `Authorization` header parsing.
//!
//! Both bearer tokens (`Bearer <jwt>`) and the Polka key (`ApiKey <key>`)
//! travel in the same header. The scheme word is ignored; only the second
//! whitespace-separated field is returned.

use axum::http::{header, HeaderMap};

use super::AuthError;

/// Extract the bearer credential (access or refresh token).
pub fn get_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_credential(headers)
}

/// Extract the static API key sent by webhook callers.
pub fn get_api_key(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_credential(headers)
}

fn extract_credential(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    if value.trim().is_empty() {
        return Err(AuthError::MissingHeader);
    }

    value
        .split_whitespace()
        .nth(1)
        .map(str::to_owned)
        .ok_or(AuthError::MalformedHeader)
}
