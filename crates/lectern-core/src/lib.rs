//! # lectern-core
//!
//! Domain layer containing entities, the slot scheduling engine, the appointment
//! state machine, repository traits, and notification events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod schedule;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Appointment, AppointmentAction, AppointmentState, Availability, Department, Faculty,
    Lecturer, MeetingOutcome, Message, ProcessingStamp, ReschedulePlan, Restriction, Student,
};
pub use error::DomainError;
pub use events::{AppointmentSnapshot, NotificationKind, PartySnapshot};
pub use schedule::{generate_slots, overlaps, Slot};
pub use traits::{
    AppointmentRepository, AvailabilityRepository, DirectoryRepository, LecturerRepository,
    MessageRepository, NewAppointment, RepoResult, RestrictionRepository, StudentRepository,
};
pub use value_objects::{validate_ranges, TimeRange};
