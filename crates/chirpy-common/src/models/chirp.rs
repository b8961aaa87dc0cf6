//! Chirp model — short text posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest chirp body accepted, in UTF-8 bytes.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// A stored chirp.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Profanity-filtered body
    pub body: String,
    /// Author
    pub user_id: Uuid,
}

/// Create chirp request. The author comes from the access token, never the body.
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

// `validator`'s length rule counts chars; the limit is on encoded bytes.
impl Validate for CreateChirpRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.body.len() > MAX_CHIRP_LENGTH {
            let mut error = ValidationError::new("length");
            error.message = Some("Chirp is too long".into());
            errors.add("body", error);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Ordering for chirp listings, by `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse the `sort` query parameter. Anything but `desc` sorts ascending.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query parameters for `GET /api/chirps`.
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsParams {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}
