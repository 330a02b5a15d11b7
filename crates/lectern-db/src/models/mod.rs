//! Database models - SQLx row types

mod appointment;
mod availability;
mod directory;
mod lecturer;
mod message;
mod restriction;
mod student;

pub use appointment::AppointmentModel;
pub use availability::AvailabilityModel;
pub use directory::{DepartmentModel, FacultyModel};
pub use lecturer::LecturerModel;
pub use message::MessageModel;
pub use restriction::RestrictionModel;
pub use student::StudentModel;
