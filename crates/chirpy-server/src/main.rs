//! # Chirpy Server
//!
//! Main binary: loads configuration, connects to PostgreSQL, applies
//! migrations and serves the REST API, admin pages and static app.

use chirpy_api::{build_router, AppState};
use chirpy_db::Database;
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Parser)]
#[command(name = "chirpy", version, about = "Chirpy microblogging server")]
struct Cli {
    /// Override the configured listen port.
    #[arg(long, env = "CHIRPY_PORT")]
    port: Option<u16>,

    /// Start without applying pending migrations.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = chirpy_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    tracing::info!(
        platform = %config.server.platform,
        "Starting Chirpy v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db = Database::connect(&config.database).await?;

    if cli.skip_migrations {
        tracing::warn!("Skipping database migrations");
    } else {
        db.migrate().await?;
    }

    let addr = SocketAddr::new(
        config.server.host.parse()?,
        cli.port.unwrap_or(config.server.port),
    );
    let router = build_router(AppState::new(db, config.clone()));

    tracing::info!(root = %config.server.filepath_root, "Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
