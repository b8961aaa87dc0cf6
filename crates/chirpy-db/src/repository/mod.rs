//! Repository layer — query functions organized by table.

pub mod chirps;
pub mod refresh_tokens;
pub mod users;
