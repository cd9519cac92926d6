use palaver_core::ratelimit::RateLimitConfig;
use std::collections::HashSet;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub provider_api_key: String,
    pub provider_base_url: String,
    pub client_api_keys: HashSet<String>,
    pub rate_limit: RateLimitConfig,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let provider_api_key = std::env::var("PROVIDER_API_KEY")
            .map_err(|_| ConfigError::MissingVar("PROVIDER_API_KEY".to_string()))?;

        let provider_base_url = std::env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| "https://api.provider.example".to_string());

        let client_api_keys: HashSet<String> = std::env::var("CLIENT_API_KEYS")
            .map_err(|_| ConfigError::MissingVar("CLIENT_API_KEYS".to_string()))?
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        if client_api_keys.is_empty() {
            return Err(ConfigError::InvalidValue(
                "CLIENT_API_KEYS".to_string(),
                "at least one API key is required".to_string(),
            ));
        }

        let window_ms = parse_var("RATE_LIMIT_WINDOW_MS", 60_000i64)?;
        if window_ms <= 0 {
            return Err(ConfigError::InvalidValue(
                "RATE_LIMIT_WINDOW_MS".to_string(),
                format!("'{window_ms}' must be positive"),
            ));
        }
        let max_requests = parse_var("RATE_LIMIT_MAX_REQUESTS", 60u32)?;
        let rate_limit = RateLimitConfig {
            window: chrono::Duration::milliseconds(window_ms),
            max_requests,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            database_url,
            provider_api_key,
            provider_base_url,
            client_api_keys,
            rate_limit,
            log_level,
        })
    }
}

/// Reads an optional numeric variable, falling back to `default`.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("'{raw}' is not a valid number"))
        }),
        Err(_) => Ok(default),
    }
}
