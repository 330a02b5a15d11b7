//! # lectern-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`services::ServiceContext`] holding the repositories,
//! the notifier and the booking configuration. The booking commit path lives
//! in [`services::BookingService`]; lifecycle transitions go through
//! [`services::AppointmentService`].

pub mod dto;
pub mod services;

pub use services::{
    AppointmentService, AvailabilityService, BookingService, DirectoryService, EmailNotifier,
    MessageService, NoopNotifier, Notifier, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
