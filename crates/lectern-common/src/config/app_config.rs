//! Application configuration structs
//!
//! Loads configuration from environment variables (and a .env file in
//! development).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub email: EmailConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
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

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Verification settings for bearer tokens issued by the hosted auth provider
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret of the auth provider
    pub jwt_secret: String,
}

/// Booking engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Slot granularity of the student booking path, in minutes
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Length of the booking block after a missed meeting, in days
    #[serde(default = "default_restriction_days")]
    pub restriction_days: u32,
    /// Fixed offset of the institution's wall clock from UTC, in hours.
    /// Dates and times are naive; "today" is derived from this offset.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            restriction_days: default_restriction_days(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Outbound email delivery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Endpoint of the third-party email API; when unset, email is disabled
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_email_from")]
    pub from: String,
}

impl EmailConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }
}

// Default value functions
fn default_app_name() -> String {
    "lectern".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_restriction_days() -> u32 {
    7
}

fn default_utc_offset_hours() -> i32 {
    3 // institution wall clock (UTC+3)
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_email_from() -> String {
    "appointments@university.example".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
            },
            booking: BookingConfig {
                slot_minutes: env::var("LECTERN_SLOT_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_slot_minutes),
                restriction_days: env::var("LECTERN_RESTRICTION_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_restriction_days),
                utc_offset_hours: env::var("LECTERN_UTC_OFFSET_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_utc_offset_hours),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: env::var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_requests_per_second),
                burst: env::var("RATE_LIMIT_BURST")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            email: EmailConfig {
                api_url: env::var("EMAIL_API_URL").ok(),
                api_key: env::var("EMAIL_API_KEY").ok(),
                from: env::var("EMAIL_FROM").unwrap_or_else(|_| default_email_from()),
            },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}")]
    InvalidVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_helpers() {
        assert!(Environment::Production.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_booking_defaults() {
        let config = BookingConfig::default();
        assert_eq!(config.slot_minutes, 30);
        assert_eq!(config.restriction_days, 7);
        assert_eq!(config.utc_offset_hours, 3);
    }

    #[test]
    fn test_email_disabled_without_url() {
        let config = EmailConfig {
            api_url: None,
            api_key: None,
            from: default_email_from(),
        };
        assert!(!config.is_enabled());
    }
}
