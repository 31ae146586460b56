//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use std::env;
use std::str::FromStr;

use tracing::Level;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app: AppSettings,
    pub log: LogConfig,
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Fallback level when `RUST_LOG` is not set
    pub level: Level,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// How a resolution context treats entities it has already seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Return the instance already cached for an ID
    #[default]
    PreferCached,
    /// Rebuild from the new payload and replace the cached instance
    Refresh,
}

impl FromStr for CachePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefer_cached" | "prefer-cached" => Ok(Self::PreferCached),
            "refresh" => Ok(Self::Refresh),
            _ => Err(()),
        }
    }
}

/// Entity cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheConfig {
    pub policy: CachePolicy,
}

// Default value functions
fn default_app_name() -> String {
    "chat-client".to_string()
}

fn default_log_level() -> Level {
    Level::INFO
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let var = |key: &'static str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let env = match var("APP_ENV") {
            Some(raw) => raw
                .parse::<Environment>()
                .map_err(|()| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let level = match var("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidValue("LOG_LEVEL", raw))?,
            None => default_log_level(),
        };

        let json = match var("LOG_JSON") {
            Some(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidValue("LOG_JSON", raw)),
            },
            None => env.is_production(),
        };

        let policy = match var("CACHE_POLICY") {
            Some(raw) => raw
                .parse::<CachePolicy>()
                .map_err(|()| ConfigError::InvalidValue("CACHE_POLICY", raw))?,
            None => CachePolicy::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            log: LogConfig { level, json },
            cache: CacheConfig { policy },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
