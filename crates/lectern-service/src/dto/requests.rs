//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Booking Requests
// ============================================================================

/// Student books a slot with a lecturer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub lecturer_id: Uuid,

    pub date: NaiveDate,

    /// Start of the offered slot; the end follows from the slot duration
    pub start_time: NaiveTime,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Availability Requests
// ============================================================================

/// One free-time window in an availability payload
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TimeRangeDto {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Lecturer publishes (or wholesale-replaces) availability for one date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetAvailabilityRequest {
    pub date: NaiveDate,

    #[validate(length(max = 24, message = "At most 24 ranges per day"))]
    pub ranges: Vec<TimeRangeDto>,

    /// Repeat the same ranges every 7 days up to and including this date
    pub repeat_weekly_until: Option<NaiveDate>,
}

// ============================================================================
// Lifecycle Requests
// ============================================================================

/// Either party cancels an appointment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CancelAppointmentRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Lecturer proposes a new time for an approved appointment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProposeRescheduleRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,

    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Student accepts or declines a reschedule proposal
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondRescheduleRequest {
    pub accept: bool,
}

/// Lecturer records whether an approved meeting actually happened
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordOutcomeRequest {
    pub held: bool,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

/// Lecturer creates a follow-up meeting, approved on creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFollowUpRequest {
    pub student_id: Uuid,

    pub date: NaiveDate,

    pub start_time: NaiveTime,

    /// Follow-up meetings are not bound to the slot duration
    pub end_time: NaiveTime,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    #[serde(default)]
    pub message: String,
}
