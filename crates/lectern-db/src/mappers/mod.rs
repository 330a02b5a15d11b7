//! Entity <-> model mappers

mod appointment;
mod availability;
mod directory;
mod lecturer;
mod message;
mod restriction;
mod student;

pub use appointment::AppointmentColumns;
pub use availability::ranges_to_json;
