//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::ChirpyError;

/// Validate a request body, returning a ChirpyError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), ChirpyError> {
    body.validate().map_err(|e| ChirpyError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>();
    // field_errors() is a HashMap; keep output stable
    messages.sort();
    messages.join("; ")
}
