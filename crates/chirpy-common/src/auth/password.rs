//! Password hashing with Argon2id.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use super::AuthError;

/// Well-formed Argon2id hash with the default parameters that matches no
/// password. Verifying against it costs the same as a real verification.
pub const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a password using Argon2id with the library's recommended parameters.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(AuthError::Hashing)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// A wrong password is [`AuthError::PasswordMismatch`]; a stored hash that
/// does not parse is [`AuthError::Hashing`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(AuthError::Hashing)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|e| match e {
            password_hash::Error::Password => AuthError::PasswordMismatch,
            other => AuthError::Hashing(other),
        })
}
