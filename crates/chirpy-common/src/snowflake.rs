//! Row ID generation.
//!
//! Users and chirps are keyed by UUID v7: time-sortable, generated without
//! coordination, and stored natively by Postgres.

use uuid::Uuid;

/// Generate a new time-sortable ID.
pub fn generate_id() -> Uuid {
    Uuid::now_v7()
}
