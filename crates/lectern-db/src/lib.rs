//! # lectern-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `lectern-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The appointments table carries a partial unique index over
//! `(lecturer_id, date, start_time)` restricted to non-cancelled rows. That
//! index is the authority on double booking; application-level availability
//! checks are a fast path in front of it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lectern_db::pool::{create_pool, DatabaseConfig};
//! use lectern_db::repositories::PgAppointmentRepository;
//! use lectern_core::traits::AppointmentRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let appointments = PgAppointmentRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAppointmentRepository, PgAvailabilityRepository, PgDirectoryRepository,
    PgLecturerRepository, PgMessageRepository, PgRestrictionRepository, PgStudentRepository,
};
