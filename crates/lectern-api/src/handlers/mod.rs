//! Request handlers organized by domain

pub mod appointments;
pub mod availability;
pub mod directory;
pub mod health;
pub mod messages;
pub mod slots;
