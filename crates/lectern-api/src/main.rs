//! Appointment API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lectern-api
//! ```
//!
//! Configuration is loaded from environment variables (and a .env file in
//! development).

use lectern_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing; JSON output in production
    let tracing_config = if std::env::var("APP_ENV").as_deref() == Ok("production") {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting appointment API server...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    lectern_api::run(config).await?;

    Ok(())
}
