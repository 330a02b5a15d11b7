//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, BookingConfig, ConfigError, CorsConfig, DatabaseConfig,
    EmailConfig, Environment, RateLimitConfig, ServerConfig,
};
