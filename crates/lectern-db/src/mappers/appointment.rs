//! Appointment entity <-> model mapper
//!
//! The lifecycle state is a tagged union in the domain and flattened nullable
//! columns in the database. Reading re-assembles the union and rejects rows
//! whose columns contradict their status instead of guessing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use lectern_core::entities::{
    Appointment, AppointmentState, MeetingOutcome, ProcessingStamp, ReschedulePlan,
};
use lectern_core::error::DomainError;

use crate::models::AppointmentModel;

fn inconsistent(id: Uuid, detail: &str) -> DomainError {
    DomainError::Storage(format!("appointment {id} has inconsistent columns: {detail}"))
}

fn stamp(model: &AppointmentModel) -> Result<ProcessingStamp, DomainError> {
    match (model.processed_by, model.processed_at) {
        (Some(by), Some(at)) => Ok(ProcessingStamp { by, at }),
        _ => Err(inconsistent(
            model.id,
            "processed_by/processed_at missing for a processed status",
        )),
    }
}

fn outcome(model: &AppointmentModel) -> Result<Option<MeetingOutcome>, DomainError> {
    match model.meeting_status.as_deref() {
        None => Ok(None),
        Some("held") => Ok(Some(MeetingOutcome::Held {
            note: model.meeting_note.clone(),
        })),
        Some("not_held") => Ok(Some(MeetingOutcome::NotHeld {
            note: model.meeting_note.clone(),
        })),
        Some(other) => Err(inconsistent(
            model.id,
            &format!("unknown meeting_status {other:?}"),
        )),
    }
}

fn proposal(model: &AppointmentModel) -> Result<ReschedulePlan, DomainError> {
    match (
        model.rescheduled_date,
        model.rescheduled_start,
        model.rescheduled_end,
        model.reschedule_reason.clone(),
    ) {
        (Some(date), Some(start_time), Some(end_time), Some(reason)) => Ok(ReschedulePlan {
            date,
            start_time,
            end_time,
            reason,
        }),
        _ => Err(inconsistent(
            model.id,
            "reschedule columns missing while awaiting student approval",
        )),
    }
}

impl TryFrom<AppointmentModel> for Appointment {
    type Error = DomainError;

    fn try_from(model: AppointmentModel) -> Result<Self, Self::Error> {
        let state = match model.status.as_str() {
            "pending" => AppointmentState::Pending,
            "approved" => AppointmentState::Approved {
                processed: stamp(&model)?,
                outcome: outcome(&model)?,
            },
            "awaiting_student_approval" => AppointmentState::AwaitingStudentApproval {
                processed: stamp(&model)?,
                proposal: proposal(&model)?,
            },
            "cancelled" => AppointmentState::Cancelled {
                processed: stamp(&model)?,
                reason: model
                    .cancel_reason
                    .clone()
                    .ok_or_else(|| inconsistent(model.id, "cancelled without cancel_reason"))?,
            },
            other => {
                return Err(inconsistent(model.id, &format!("unknown status {other:?}")));
            }
        };

        Ok(Appointment {
            id: model.id,
            lecturer_id: model.lecturer_id,
            student_id: model.student_id,
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            subject: model.subject,
            message: model.message,
            state,
            follow_up: model.follow_up,
            created_at: model.created_at,
        })
    }
}

/// Appointment state flattened into column values for insert/update binding
#[derive(Debug)]
pub struct AppointmentColumns<'a> {
    pub status: &'static str,
    pub processed_by: Option<Uuid>,
    pub processed_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<&'a str>,
    pub rescheduled_date: Option<NaiveDate>,
    pub rescheduled_start: Option<NaiveTime>,
    pub rescheduled_end: Option<NaiveTime>,
    pub reschedule_reason: Option<&'a str>,
    pub meeting_status: Option<&'static str>,
    pub meeting_note: Option<&'a str>,
}

impl<'a> From<&'a Appointment> for AppointmentColumns<'a> {
    fn from(appointment: &'a Appointment) -> Self {
        let mut columns = Self {
            status: appointment.state.name(),
            processed_by: None,
            processed_at: None,
            cancel_reason: None,
            rescheduled_date: None,
            rescheduled_start: None,
            rescheduled_end: None,
            reschedule_reason: None,
            meeting_status: None,
            meeting_note: None,
        };

        match &appointment.state {
            AppointmentState::Pending => {}
            AppointmentState::Approved { processed, outcome } => {
                columns.processed_by = Some(processed.by);
                columns.processed_at = Some(processed.at);
                match outcome {
                    Some(MeetingOutcome::Held { note }) => {
                        columns.meeting_status = Some("held");
                        columns.meeting_note = note.as_deref();
                    }
                    Some(MeetingOutcome::NotHeld { note }) => {
                        columns.meeting_status = Some("not_held");
                        columns.meeting_note = note.as_deref();
                    }
                    None => {}
                }
            }
            AppointmentState::AwaitingStudentApproval {
                processed,
                proposal,
            } => {
                columns.processed_by = Some(processed.by);
                columns.processed_at = Some(processed.at);
                columns.rescheduled_date = Some(proposal.date);
                columns.rescheduled_start = Some(proposal.start_time);
                columns.rescheduled_end = Some(proposal.end_time);
                columns.reschedule_reason = Some(&proposal.reason);
            }
            AppointmentState::Cancelled { processed, reason } => {
                columns.processed_by = Some(processed.by);
                columns.processed_at = Some(processed.at);
                columns.cancel_reason = Some(reason);
            }
        }

        columns
    }
}
