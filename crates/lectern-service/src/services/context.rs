//! Service context - dependency container for services
//!
//! Holds the repositories, the notifier and the booking configuration needed
//! by services.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use lectern_common::BookingConfig;
use lectern_core::traits::{
    AppointmentRepository, AvailabilityRepository, DirectoryRepository, LecturerRepository,
    MessageRepository, RestrictionRepository, StudentRepository,
};
use lectern_db::PgPool;

use super::notify::Notifier;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The outbound notifier (email delivery API)
/// - Booking configuration (slot duration, restriction window, clock offset)
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    student_repo: Arc<dyn StudentRepository>,
    lecturer_repo: Arc<dyn LecturerRepository>,
    directory_repo: Arc<dyn DirectoryRepository>,
    availability_repo: Arc<dyn AvailabilityRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    restriction_repo: Arc<dyn RestrictionRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Outbound notifications
    notifier: Arc<dyn Notifier>,

    // Configuration
    booking: BookingConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        student_repo: Arc<dyn StudentRepository>,
        lecturer_repo: Arc<dyn LecturerRepository>,
        directory_repo: Arc<dyn DirectoryRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        appointment_repo: Arc<dyn AppointmentRepository>,
        restriction_repo: Arc<dyn RestrictionRepository>,
        message_repo: Arc<dyn MessageRepository>,
        notifier: Arc<dyn Notifier>,
        booking: BookingConfig,
    ) -> Self {
        Self {
            pool,
            student_repo,
            lecturer_repo,
            directory_repo,
            availability_repo,
            appointment_repo,
            restriction_repo,
            message_repo,
            notifier,
            booking,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the student repository
    pub fn student_repo(&self) -> &dyn StudentRepository {
        self.student_repo.as_ref()
    }

    /// Get the lecturer repository
    pub fn lecturer_repo(&self) -> &dyn LecturerRepository {
        self.lecturer_repo.as_ref()
    }

    /// Get the directory repository
    pub fn directory_repo(&self) -> &dyn DirectoryRepository {
        self.directory_repo.as_ref()
    }

    /// Get the availability repository
    pub fn availability_repo(&self) -> &dyn AvailabilityRepository {
        self.availability_repo.as_ref()
    }

    /// Get the appointment repository
    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    /// Get the restriction repository
    pub fn restriction_repo(&self) -> &dyn RestrictionRepository {
        self.restriction_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Notifications ===

    /// Get the notifier as a shareable handle (for fire-and-forget tasks)
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    // === Configuration ===

    /// Get the booking configuration
    pub fn booking(&self) -> &BookingConfig {
        &self.booking
    }

    /// The current date in institution-local time.
    ///
    /// All date comparisons (restriction expiry, past-date rejection) use
    /// this clock, derived from UTC plus the configured offset.
    pub fn today(&self) -> NaiveDate {
        (Utc::now() + Duration::hours(i64::from(self.booking.utc_offset_hours))).date_naive()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("booking", &self.booking)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    student_repo: Option<Arc<dyn StudentRepository>>,
    lecturer_repo: Option<Arc<dyn LecturerRepository>>,
    directory_repo: Option<Arc<dyn DirectoryRepository>>,
    availability_repo: Option<Arc<dyn AvailabilityRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    restriction_repo: Option<Arc<dyn RestrictionRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
    booking: BookingConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            student_repo: None,
            lecturer_repo: None,
            directory_repo: None,
            availability_repo: None,
            appointment_repo: None,
            restriction_repo: None,
            message_repo: None,
            notifier: None,
            booking: BookingConfig::default(),
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn student_repo(mut self, repo: Arc<dyn StudentRepository>) -> Self {
        self.student_repo = Some(repo);
        self
    }

    pub fn lecturer_repo(mut self, repo: Arc<dyn LecturerRepository>) -> Self {
        self.lecturer_repo = Some(repo);
        self
    }

    pub fn directory_repo(mut self, repo: Arc<dyn DirectoryRepository>) -> Self {
        self.directory_repo = Some(repo);
        self
    }

    pub fn availability_repo(mut self, repo: Arc<dyn AvailabilityRepository>) -> Self {
        self.availability_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn restriction_repo(mut self, repo: Arc<dyn RestrictionRepository>) -> Self {
        self.restriction_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn booking(mut self, booking: BookingConfig) -> Self {
        self.booking = booking;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.student_repo
                .ok_or_else(|| ServiceError::validation("student_repo is required"))?,
            self.lecturer_repo
                .ok_or_else(|| ServiceError::validation("lecturer_repo is required"))?,
            self.directory_repo
                .ok_or_else(|| ServiceError::validation("directory_repo is required"))?,
            self.availability_repo
                .ok_or_else(|| ServiceError::validation("availability_repo is required"))?,
            self.appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            self.restriction_repo
                .ok_or_else(|| ServiceError::validation("restriction_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.booking,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
