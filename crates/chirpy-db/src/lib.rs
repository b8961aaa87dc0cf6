//! # chirpy-db
//!
//! Database layer for Chirpy. All persistent state (users, chirps, refresh
//! tokens) lives in PostgreSQL; schema changes ship as embedded migrations.

pub mod repository;

use anyhow::Result;
use sqlx::PgPool;

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    /// Connect to PostgreSQL.
    pub async fn connect(config: &chirpy_common::config::DatabaseConfig) -> Result<Self> {
        tracing::info!("Connecting to PostgreSQL...");
        let pg = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pg })
    }

    /// Wrap an existing pool. Nothing is opened until the first query.
    pub fn from_pool(pg: PgPool) -> Self {
        Self { pg }
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pg).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }
}
