//! Service layer
//!
//! Business logic and use cases. Each service borrows the shared
//! [`ServiceContext`] and exposes the operations of one area.

mod appointment;
mod availability;
mod booking;
mod context;
mod directory;
mod error;
mod message;
mod notify;

#[cfg(test)]
pub(crate) mod test_support;

pub use appointment::AppointmentService;
pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use directory::DirectoryService;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use notify::{EmailNotifier, NoopNotifier, Notifier, NotifyError};
