//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::{
    Appointment, Availability, Department, Faculty, Lecturer, Message, Restriction, Student,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Student / Lecturer / Directory
// ============================================================================

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find student by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>>;
}

#[async_trait]
pub trait LecturerRepository: Send + Sync {
    /// Find lecturer by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Lecturer>>;

    /// List lecturers, optionally filtered by faculty and department, ordered by name
    async fn list(
        &self,
        faculty_id: Option<Uuid>,
        department_id: Option<Uuid>,
    ) -> RepoResult<Vec<Lecturer>>;
}

#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// List all faculties ordered by name
    async fn list_faculties(&self) -> RepoResult<Vec<Faculty>>;

    /// List departments of a faculty ordered by name
    async fn list_departments(&self, faculty_id: Uuid) -> RepoResult<Vec<Department>>;
}

// ============================================================================
// Availability
// ============================================================================

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Find the availability record for one (lecturer, date)
    async fn find_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Option<Availability>>;

    /// List a lecturer's availability from `from` onwards, ordered by date
    async fn list_by_lecturer(
        &self,
        lecturer_id: Uuid,
        from: NaiveDate,
    ) -> RepoResult<Vec<Availability>>;

    /// Create or wholesale-replace the record keyed by (lecturer, date)
    async fn upsert(&self, availability: &Availability) -> RepoResult<()>;

    /// Delete the record for one (lecturer, date); Ok even if absent
    async fn delete(&self, lecturer_id: Uuid, date: NaiveDate) -> RepoResult<()>;
}

// ============================================================================
// Appointment
// ============================================================================

/// Insert payload for a new appointment.
///
/// Insertion must surface a storage unique-constraint rejection on
/// (lecturer_id, date, start_time) over non-cancelled rows as
/// [`DomainError::SlotAlreadyTaken`], distinguishable from other write errors.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub appointment: Appointment,
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>>;

    /// All non-cancelled appointments for one (lecturer, date)
    async fn find_active_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>>;

    /// A lecturer's appointments with the given status name, newest date first
    async fn find_by_lecturer_status(
        &self,
        lecturer_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>>;

    /// A student's appointments with the given status name, newest date first
    async fn find_by_student_status(
        &self,
        student_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>>;

    /// Per-status appointment counts for a lecturer
    async fn count_by_lecturer(&self, lecturer_id: Uuid) -> RepoResult<Vec<(String, i64)>>;

    /// Per-status appointment counts for a student
    async fn count_by_student(&self, student_id: Uuid) -> RepoResult<Vec<(String, i64)>>;

    /// Insert a new appointment; unique-constraint rejection maps to SlotAlreadyTaken
    async fn insert(&self, new: &NewAppointment) -> RepoResult<()>;

    /// Persist the current state (and possibly rescheduled times) of an appointment
    async fn update(&self, appointment: &Appointment) -> RepoResult<()>;
}

// ============================================================================
// Restriction
// ============================================================================

#[async_trait]
pub trait RestrictionRepository: Send + Sync {
    /// All restrictions for (student, lecturer) with end_date >= today
    async fn find_active(
        &self,
        student_id: Uuid,
        lecturer_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>>;

    /// All of a student's restrictions with end_date >= today (directory annotation)
    async fn find_active_for_student(
        &self,
        student_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>>;

    /// Insert a new restriction
    async fn insert(&self, restriction: &Restriction) -> RepoResult<()>;
}

// ============================================================================
// Message
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message
    async fn insert(&self, message: &Message) -> RepoResult<()>;

    /// List a student's messages, newest first
    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Message>>;

    /// Mark all of a student's messages as viewed
    async fn mark_viewed(&self, student_id: Uuid) -> RepoResult<u64>;
}
