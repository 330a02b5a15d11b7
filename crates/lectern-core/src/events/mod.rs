//! Notification events handed to the out-of-band notifier

mod notification;

pub use notification::{AppointmentSnapshot, NotificationKind, PartySnapshot};
