//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::path::PathBuf;

const MIN_JWT_SECRET_LEN: usize = 32;
/// Ten years.
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:2000`).
    pub server_addr: SocketAddr,
    /// PostgreSQL connection URL. When unset, accounts and listings live in memory.
    pub database_url: Option<String>,
    /// JWT signing secret (min 32 chars).
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expiration_hours: i64,
    /// Directory served under `/`, `/index.html` and `/static/**`.
    pub static_dir: PathBuf,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr =
            std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:2000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "jobs_jwt_secret_change_in_production_32chars".to_string());
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigLoadError::WeakJwtSecret(MIN_JWT_SECRET_LEN));
        }

        let jwt_expiration_hours = match std::env::var("JWT_EXPIRATION_HOURS") {
            Ok(raw) => parse_expiration_hours(&raw)?,
            Err(_) => 24,
        };

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            static_dir,
            log_level,
        })
    }
}

/// Token lifetime must be between one hour and [`MAX_JWT_EXPIRATION_HOURS`].
fn parse_expiration_hours(raw: &str) -> Result<i64, ConfigLoadError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|h| (1..=MAX_JWT_EXPIRATION_HOURS).contains(h))
        .ok_or_else(|| ConfigLoadError::InvalidExpiration(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("JWT_SECRET must be at least {0} characters")]
    WeakJwtSecret(usize),
    #[error("Invalid JWT_EXPIRATION_HOURS: {0}")]
    InvalidExpiration(String),
}
