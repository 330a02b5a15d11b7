//! Appointment database model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for appointments table.
///
/// The lifecycle state is flattened into nullable columns: `status` holds the
/// state name, and the processing stamp, cancel reason, reschedule proposal
/// and meeting outcome columns are populated only in the states where they
/// apply. The mapper re-assembles the tagged state and rejects rows whose
/// columns are inconsistent with their status.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub processed_by: Option<Uuid>,
    pub processed_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub rescheduled_date: Option<NaiveDate>,
    pub rescheduled_start: Option<NaiveTime>,
    pub rescheduled_end: Option<NaiveTime>,
    pub reschedule_reason: Option<String>,
    pub meeting_status: Option<String>,
    pub meeting_note: Option<String>,
    pub follow_up: bool,
    pub created_at: DateTime<Utc>,
}
