//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AppointmentRepository, AvailabilityRepository, DirectoryRepository, LecturerRepository,
    MessageRepository, NewAppointment, RepoResult, RestrictionRepository, StudentRepository,
};
