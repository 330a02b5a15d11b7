//! Appointment entity and its lifecycle state machine
//!
//! Status is a closed tagged union; every variant carries exactly the fields
//! valid in that state. All transitions go through [`Appointment::apply`],
//! which rejects illegal moves centrally instead of trusting call sites.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Who processed a transition and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStamp {
    pub by: Uuid,
    pub at: DateTime<Utc>,
}

impl ProcessingStamp {
    pub fn now(by: Uuid) -> Self {
        Self { by, at: Utc::now() }
    }
}

/// A lecturer's proposed replacement time, awaiting the student's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReschedulePlan {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: String,
}

/// Outcome recorded by the lecturer after an approved meeting's date has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingOutcome {
    Held { note: Option<String> },
    NotHeld { note: Option<String> },
}

impl MeetingOutcome {
    /// Whether this outcome triggers a booking restriction for the student
    #[inline]
    pub fn triggers_restriction(&self) -> bool {
        matches!(self, Self::NotHeld { .. })
    }
}

/// Appointment lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentState {
    /// Requested by a student, not yet processed by the lecturer
    Pending,
    /// Confirmed; `outcome` is set once the lecturer records whether the
    /// meeting actually happened
    Approved {
        processed: ProcessingStamp,
        outcome: Option<MeetingOutcome>,
    },
    /// Lecturer proposed a new time; the student must accept or decline
    AwaitingStudentApproval {
        processed: ProcessingStamp,
        proposal: ReschedulePlan,
    },
    /// Terminal. The slot is released; the row is kept for history.
    Cancelled {
        processed: ProcessingStamp,
        reason: String,
    },
}

impl AppointmentState {
    /// Stable status name, used for storage and API payloads
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved { .. } => "approved",
            Self::AwaitingStudentApproval { .. } => "awaiting_student_approval",
            Self::Cancelled { .. } => "cancelled",
        }
    }

    /// Whether this state occupies its slot for conflict purposes
    #[inline]
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }
}

/// An action applied to an appointment by one of the parties
#[derive(Debug, Clone)]
pub enum AppointmentAction {
    /// Lecturer approves a pending request
    Approve { by: Uuid },
    /// Either party cancels; a human-entered reason is mandatory
    Cancel { by: Uuid, reason: String },
    /// Lecturer proposes a new time for an approved appointment
    ProposeReschedule { by: Uuid, plan: ReschedulePlan },
    /// Student accepts the proposal; date and times are overwritten from it
    AcceptReschedule { by: Uuid },
    /// Student declines the proposal; the appointment is cancelled
    DeclineReschedule { by: Uuid },
    /// Lecturer records whether an approved meeting actually happened
    RecordOutcome { by: Uuid, outcome: MeetingOutcome },
}

impl AppointmentAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Cancel { .. } => "cancel",
            Self::ProposeReschedule { .. } => "propose reschedule",
            Self::AcceptReschedule { .. } => "accept reschedule",
            Self::DeclineReschedule { .. } => "decline reschedule",
            Self::RecordOutcome { .. } => "record outcome of",
        }
    }
}

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub message: String,
    pub state: AppointmentState,
    /// Created directly by the lecturer as a follow-up meeting
    pub follow_up: bool,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new pending appointment request
    pub fn request(
        lecturer_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: String,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lecturer_id,
            student_id,
            date,
            start_time,
            end_time,
            subject,
            message,
            state: AppointmentState::Pending,
            follow_up: false,
            created_at: Utc::now(),
        }
    }

    /// Create a follow-up meeting, approved on creation by the lecturer
    pub fn follow_up(
        lecturer_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: String,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lecturer_id,
            student_id,
            date,
            start_time,
            end_time,
            subject,
            message,
            state: AppointmentState::Approved {
                processed: ProcessingStamp::now(lecturer_id),
                outcome: None,
            },
            follow_up: true,
            created_at: Utc::now(),
        }
    }

    /// Whether this appointment occupies its slot for conflict purposes
    #[inline]
    pub fn occupies_slot(&self) -> bool {
        self.state.occupies_slot()
    }

    /// Apply a lifecycle action, rejecting illegal transitions.
    ///
    /// Legal moves:
    /// - pending -> approved | cancelled
    /// - approved -> cancelled | awaiting_student_approval; outcome may be
    ///   recorded once while approved
    /// - awaiting_student_approval -> approved (times overwritten from the
    ///   proposal) | cancelled
    /// - cancelled accepts nothing
    pub fn apply(&mut self, action: AppointmentAction) -> Result<(), DomainError> {
        let illegal = |state: &AppointmentState, action: &AppointmentAction| {
            Err(DomainError::InvalidTransition {
                state: state.name(),
                action: action.name(),
            })
        };

        match (&self.state, &action) {
            (AppointmentState::Pending, AppointmentAction::Approve { by }) => {
                self.state = AppointmentState::Approved {
                    processed: ProcessingStamp::now(*by),
                    outcome: None,
                };
                Ok(())
            }
            (
                AppointmentState::Pending
                | AppointmentState::Approved { .. }
                | AppointmentState::AwaitingStudentApproval { .. },
                AppointmentAction::Cancel { by, reason },
            ) => {
                if reason.trim().is_empty() {
                    return Err(DomainError::ValidationError(
                        "A cancellation reason is required".to_string(),
                    ));
                }
                self.state = AppointmentState::Cancelled {
                    processed: ProcessingStamp::now(*by),
                    reason: reason.clone(),
                };
                Ok(())
            }
            (
                AppointmentState::Approved { .. },
                AppointmentAction::ProposeReschedule { by, plan },
            ) => {
                if plan.start_time >= plan.end_time {
                    return Err(DomainError::InvalidRange {
                        start: plan.start_time,
                        end: plan.end_time,
                    });
                }
                if plan.reason.trim().is_empty() {
                    return Err(DomainError::ValidationError(
                        "A reschedule reason is required".to_string(),
                    ));
                }
                self.state = AppointmentState::AwaitingStudentApproval {
                    processed: ProcessingStamp::now(*by),
                    proposal: plan.clone(),
                };
                Ok(())
            }
            (
                AppointmentState::AwaitingStudentApproval { proposal, .. },
                AppointmentAction::AcceptReschedule { by },
            ) => {
                let (date, start, end) = (proposal.date, proposal.start_time, proposal.end_time);
                self.date = date;
                self.start_time = start;
                self.end_time = end;
                self.state = AppointmentState::Approved {
                    processed: ProcessingStamp::now(*by),
                    outcome: None,
                };
                Ok(())
            }
            (
                AppointmentState::AwaitingStudentApproval { .. },
                AppointmentAction::DeclineReschedule { by },
            ) => {
                self.state = AppointmentState::Cancelled {
                    processed: ProcessingStamp::now(*by),
                    reason: "Reschedule proposal declined by the student".to_string(),
                };
                Ok(())
            }
            (
                AppointmentState::Approved { processed, outcome },
                AppointmentAction::RecordOutcome {
                    outcome: new_outcome,
                    ..
                },
            ) => {
                if outcome.is_some() {
                    return Err(DomainError::OutcomeAlreadyRecorded);
                }
                let processed = *processed;
                self.state = AppointmentState::Approved {
                    processed,
                    outcome: Some(new_outcome.clone()),
                };
                Ok(())
            }
            (state, action) => illegal(state, action),
        }
    }
}
