//! # chirpy-common
//!
//! Shared types, configuration, error handling, and auth primitives used across all Chirpy crates.
//! This is the foundation layer — no HTTP routing and no SQL, just primitives and contracts.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod profanity;
pub mod snowflake;
pub mod validation;
