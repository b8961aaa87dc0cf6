//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: legacy env vars > CHIRPY__ env vars > config.toml > .env > defaults

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Platform name that unlocks destructive admin endpoints.
pub const DEV_PLATFORM: &str = "dev";

/// Upper bound for either token TTL (ten years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code accesses config.
pub fn init() -> Result<&'static AppConfig, ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = defaults()?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (CHIRPY__SERVER__PORT, CHIRPY__DATABASE__URL, etc.)
        .add_source(
            config::Environment::with_prefix("CHIRPY")
                .separator("__")
                .try_parsing(true),
        )
        // Flat variable names used by existing deployments
        .set_override_option("database.url", std::env::var("DB_URL").ok())?
        .set_override_option("auth.jwt_secret", std::env::var("SECRET").ok())?
        .set_override_option("polka.api_key", std::env::var("POLKA_API_KEY").ok())?
        .set_override_option("server.platform", std::env::var("PLATFORM").ok())?
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    app_config.validate()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// Builder pre-populated with every default value.
pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.platform", "prod")?
        .set_default("server.filepath_root", ".")?
        .set_default("database.max_connections", 10)?
        .set_default("database.min_connections", 1)?
        .set_default("auth.access_token_ttl_secs", 3600)? // 1 hour
        .set_default("auth.refresh_token_ttl_secs", 5_184_000) // 60 days
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub polka: PolkaConfig,
}

impl AppConfig {
    /// Reject configurations that would leave auth wide open.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".into()));
        }
        if self.polka.api_key.trim().is_empty() {
            return Err(ConfigError::Message("polka.api_key must not be empty".into()));
        }
        for (key, secs) in [
            ("auth.access_token_ttl_secs", self.auth.access_token_ttl_secs),
            ("auth.refresh_token_ttl_secs", self.auth.refresh_token_ttl_secs),
        ] {
            if !(1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
                return Err(ConfigError::Message(format!(
                    "{key} must be between 1 and {MAX_TOKEN_TTL_SECS} seconds"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment platform. Only `dev` allows `POST /admin/reset` to wipe data.
    pub platform: String,
    /// Directory served under `/app/`.
    pub filepath_root: String,
}

impl ServerConfig {
    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Access token TTL in seconds
    pub access_token_ttl_secs: u64,
    /// Refresh token TTL in seconds
    pub refresh_token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn access_token_ttl(&self) -> chrono::Duration {
        ttl(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        ttl(self.refresh_token_ttl_secs)
    }
}

// Clamped so an unvalidated config can't overflow `DateTime + Duration`.
fn ttl(secs: u64) -> chrono::Duration {
    chrono::Duration::seconds(secs.min(MAX_TOKEN_TTL_SECS) as i64)
}

/// Polka billing webhook settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    /// Shared key Polka sends as `Authorization: ApiKey <key>`
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn load(toml: &str) -> Result<AppConfig, ConfigError> {
        defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    const REQUIRED: &str = r#"
        [database]
        url = "postgres://localhost/chirpy"
        [auth]
        jwt_secret = "s3cret"
        [polka]
        api_key = "f271c81ff7084ee5b99a5091b42d486e"
    "#;

    #[test]
    fn defaults_fill_in_optional_keys() {
        let cfg = load(REQUIRED).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.platform, "prod");
        assert!(!cfg.server.is_dev());
        assert_eq!(cfg.auth.access_token_ttl(), chrono::Duration::hours(1));
        assert_eq!(cfg.auth.refresh_token_ttl(), chrono::Duration::days(60));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_database_url_fails() {
        let toml = r#"
            [auth]
            jwt_secret = "s3cret"
            [polka]
            api_key = "key"
        "#;
        assert!(load(toml).is_err());
    }

    #[test]
    fn out_of_range_ttls_are_rejected() {
        let mut cfg = load(REQUIRED).unwrap();
        cfg.auth.access_token_ttl_secs = u64::MAX;
        assert!(cfg.validate().is_err());
        // Accessor stays usable even before validation
        assert_eq!(
            cfg.auth.access_token_ttl(),
            chrono::Duration::seconds(MAX_TOKEN_TTL_SECS as i64)
        );

        cfg.auth.access_token_ttl_secs = 3600;
        cfg.auth.refresh_token_ttl_secs = 0;
        assert!(cfg.validate().is_err());

        cfg.auth.refresh_token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut cfg = load(REQUIRED).unwrap();
        cfg.auth.jwt_secret = "   ".into();
        assert!(cfg.validate().is_err());
    }
}
