//! Response DTOs for API endpoints

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use lectern_core::entities::{
    Appointment, AppointmentState, Availability, Department, Faculty, Lecturer, MeetingOutcome,
    Message,
};
use lectern_core::schedule::Slot;

// ============================================================================
// Appointments
// ============================================================================

/// Reschedule proposal attached to an appointment awaiting student approval
#[derive(Debug, Clone, Serialize)]
pub struct RescheduleResponse {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
}

/// Recorded meeting outcome
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeResponse {
    pub held: bool,
    pub note: Option<String>,
}

/// Appointment response
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub message: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reschedule: Option<RescheduleResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeResponse>,
    pub follow_up: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        let mut response = Self {
            id: appointment.id,
            lecturer_id: appointment.lecturer_id,
            student_id: appointment.student_id,
            date: appointment.date,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            subject: appointment.subject.clone(),
            message: appointment.message.clone(),
            status: appointment.state.name(),
            processed_by: None,
            processed_at: None,
            cancel_reason: None,
            reschedule: None,
            outcome: None,
            follow_up: appointment.follow_up,
            created_at: appointment.created_at,
        };

        match &appointment.state {
            AppointmentState::Pending => {}
            AppointmentState::Approved { processed, outcome } => {
                response.processed_by = Some(processed.by);
                response.processed_at = Some(processed.at);
                response.outcome = outcome.as_ref().map(|o| match o {
                    MeetingOutcome::Held { note } => OutcomeResponse {
                        held: true,
                        note: note.clone(),
                    },
                    MeetingOutcome::NotHeld { note } => OutcomeResponse {
                        held: false,
                        note: note.clone(),
                    },
                });
            }
            AppointmentState::AwaitingStudentApproval {
                processed,
                proposal,
            } => {
                response.processed_by = Some(processed.by);
                response.processed_at = Some(processed.at);
                response.reschedule = Some(RescheduleResponse {
                    date: proposal.date,
                    start_time: proposal.start_time,
                    end_time: proposal.end_time,
                    reason: proposal.reason.clone(),
                });
            }
            AppointmentState::Cancelled { processed, reason } => {
                response.processed_by = Some(processed.by);
                response.processed_at = Some(processed.at);
                response.cancel_reason = Some(reason.clone());
            }
        }

        response
    }
}

/// Per-status appointment counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentStatsResponse {
    pub pending: i64,
    pub approved: i64,
    pub awaiting_student_approval: i64,
    pub cancelled: i64,
    pub total: i64,
}

impl AppointmentStatsResponse {
    /// Build from (status, count) rows; unknown statuses are ignored
    #[must_use]
    pub fn from_counts(counts: &[(String, i64)]) -> Self {
        let mut stats = Self::default();
        for (status, count) in counts {
            match status.as_str() {
                "pending" => stats.pending = *count,
                "approved" => stats.approved = *count,
                "awaiting_student_approval" => stats.awaiting_student_approval = *count,
                "cancelled" => stats.cancelled = *count,
                _ => continue,
            }
            stats.total += count;
        }
        stats
    }
}

// ============================================================================
// Slots & Availability
// ============================================================================

/// One bookable slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&Slot> for SlotResponse {
    fn from(slot: &Slot) -> Self {
        Self {
            date: slot.date,
            start_time: slot.start,
            end_time: slot.end,
        }
    }
}

/// Open slots for one (lecturer, date)
#[derive(Debug, Clone, Serialize)]
pub struct DaySlotsResponse {
    pub lecturer_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<SlotResponse>,
}

/// One published availability record
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub ranges: Vec<TimeRangeResponse>,
    pub updated_at: DateTime<Utc>,
}

/// One free-time window
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeRangeResponse {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl From<&Availability> for AvailabilityResponse {
    fn from(availability: &Availability) -> Self {
        Self {
            date: availability.date,
            ranges: availability
                .ranges
                .iter()
                .map(|r| TimeRangeResponse {
                    start: r.start,
                    end: r.end,
                })
                .collect(),
            updated_at: availability.updated_at,
        }
    }
}

// ============================================================================
// Directory
// ============================================================================

/// Faculty response
#[derive(Debug, Clone, Serialize)]
pub struct FacultyResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Faculty> for FacultyResponse {
    fn from(faculty: &Faculty) -> Self {
        Self {
            id: faculty.id,
            name: faculty.name.clone(),
        }
    }
}

/// Department response
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub name: String,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            faculty_id: department.faculty_id,
            name: department.name.clone(),
        }
    }
}

/// Lecturer response, annotated with the caller's restriction when present
#[derive(Debug, Clone, Serialize)]
pub struct LecturerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub faculty_id: Uuid,
    pub department_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_until: Option<NaiveDate>,
}

impl From<&Lecturer> for LecturerResponse {
    fn from(lecturer: &Lecturer) -> Self {
        Self {
            id: lecturer.id,
            name: lecturer.name.clone(),
            email: lecturer.email.clone(),
            faculty_id: lecturer.faculty_id,
            department_id: lecturer.department_id,
            restricted_until: None,
        }
    }
}

/// Whether the caller is currently blocked from booking a lecturer
#[derive(Debug, Clone, Serialize)]
pub struct RestrictionStatusResponse {
    pub restricted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

// ============================================================================
// Messages
// ============================================================================

/// In-app notification response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub viewed_by_student: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            lecturer_id: message.lecturer_id,
            student_id: message.student_id,
            content: message.content.clone(),
            viewed_by_student: message.viewed_by_student,
            created_at: message.created_at,
        }
    }
}
