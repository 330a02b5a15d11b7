//! Notification event payloads
//!
//! Emitted on booking-engine side effects and consumed by the email
//! collaborator. Delivery is best-effort and never feeds back into the
//! booking flow.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{Appointment, Lecturer, Student};

/// What happened to the appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Created,
    Approved,
    Cancelled,
    Rescheduled,
}

/// Immutable appointment snapshot taken at notification time
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentSnapshot {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub status: &'static str,
}

impl From<&Appointment> for AppointmentSnapshot {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            subject: appointment.subject.clone(),
            status: appointment.state.name(),
        }
    }
}

/// Name and address of one notification recipient
#[derive(Debug, Clone, Serialize)]
pub struct PartySnapshot {
    pub name: String,
    pub email: String,
}

impl From<&Student> for PartySnapshot {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
        }
    }
}

impl From<&Lecturer> for PartySnapshot {
    fn from(lecturer: &Lecturer) -> Self {
        Self {
            name: lecturer.name.clone(),
            email: lecturer.email.clone(),
        }
    }
}
