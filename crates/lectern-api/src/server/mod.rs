//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use lectern_common::{AppConfig, AppError, TokenVerifier};
use lectern_db::{
    create_pool, run_migrations, PgAppointmentRepository, PgAvailabilityRepository,
    PgDirectoryRepository, PgLecturerRepository, PgMessageRepository, PgRestrictionRepository,
    PgStudentRepository,
};
use lectern_service::{EmailNotifier, NoopNotifier, Notifier, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware_with_config, REQUEST_ID_HEADER};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints bypass rate limiting
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = lectern_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    // Token verifier for provider-issued bearer tokens
    let token_verifier = TokenVerifier::new(&config.auth.jwt_secret);

    // Outbound email, disabled unless an API endpoint is configured
    let notifier: Arc<dyn Notifier> = match EmailNotifier::from_config(&config.email) {
        Some(notifier) => Arc::new(notifier),
        None => {
            info!("Email delivery not configured, notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    // Create repositories
    let student_repo = Arc::new(PgStudentRepository::new(pool.clone()));
    let lecturer_repo = Arc::new(PgLecturerRepository::new(pool.clone()));
    let directory_repo = Arc::new(PgDirectoryRepository::new(pool.clone()));
    let availability_repo = Arc::new(PgAvailabilityRepository::new(pool.clone()));
    let appointment_repo = Arc::new(PgAppointmentRepository::new(pool.clone()));
    let restriction_repo = Arc::new(PgRestrictionRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .student_repo(student_repo)
        .lecturer_repo(lecturer_repo)
        .directory_repo(directory_repo)
        .availability_repo(availability_repo)
        .appointment_repo(appointment_repo)
        .restriction_repo(restriction_repo)
        .message_repo(message_repo)
        .notifier(notifier)
        .booking(config.booking.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, token_verifier, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!(request_id_header = REQUEST_ID_HEADER, "Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
