//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CacheConfig, CachePolicy, ConfigError, Environment, LogConfig,
};
