//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// List response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Optional one-time admin provisioning.
    #[serde(default)]
    pub bootstrap: Option<BootstrapConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

/// In-memory wish list cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether list responses are cached.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of cached list responses.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    /// Seconds before a cached response is considered stale.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Initial admin account, created at start-up when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Admin email address.
    pub admin_email: String,
    /// Admin password (plain text, hashed before storage).
    pub admin_password: String,
    /// Admin display name.
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_token_ttl_hours() -> i64 {
    24 * 7
}

const fn default_true() -> bool {
    true
}

const fn default_cache_capacity() -> usize {
    256
}

const fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `WISHBOARD_ENV`)
    /// 4. Environment variables with `WISHBOARD__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("WISHBOARD_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WISHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("WISHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
