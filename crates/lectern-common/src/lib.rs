//! # lectern-common
//!
//! Shared utilities including configuration, error handling, bearer-token
//! verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, Role, TokenError, TokenVerifier};
pub use config::{
    AppConfig, AppSettings, AuthConfig, BookingConfig, ConfigError, CorsConfig, DatabaseConfig,
    EmailConfig, Environment, RateLimitConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
