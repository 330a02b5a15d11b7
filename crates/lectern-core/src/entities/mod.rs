//! Domain entities - core business objects

mod appointment;
mod availability;
mod directory;
mod lecturer;
mod message;
mod restriction;
mod student;

pub use appointment::{
    Appointment, AppointmentAction, AppointmentState, MeetingOutcome, ProcessingStamp,
    ReschedulePlan,
};
pub use availability::Availability;
pub use directory::{Department, Faculty};
pub use lecturer::Lecturer;
pub use message::Message;
pub use restriction::Restriction;
pub use student::Student;
