//! Core domain models shared across all Chirpy crates.
//!
//! These are the "truth" types — what the database stores and the API serializes.

pub mod chirp;
pub mod refresh_token;
pub mod user;
pub mod webhook;

/// Re-export all model types for convenience.
pub use chirp::*;
pub use refresh_token::*;
pub use user::*;
pub use webhook::*;
