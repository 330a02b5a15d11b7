//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! lectern-core. Each repository handles database operations for a specific
//! domain entity.

mod appointment;
mod availability;
mod directory;
mod error;
mod lecturer;
mod message;
mod restriction;
mod student;

pub use appointment::PgAppointmentRepository;
pub use availability::PgAvailabilityRepository;
pub use directory::PgDirectoryRepository;
pub use lecturer::PgLecturerRepository;
pub use message::PgMessageRepository;
pub use restriction::PgRestrictionRepository;
pub use student::PgStudentRepository;
