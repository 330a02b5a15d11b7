//! Appointment lifecycle service
//!
//! Approve, cancel, reschedule, outcome recording and follow-up creation.
//! Every transition goes through the entity state machine; this layer adds
//! ownership checks, persistence, in-app messages and notifications.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use lectern_common::Role;
use lectern_core::entities::{
    Appointment, AppointmentAction, Lecturer, MeetingOutcome, Message, ReschedulePlan, Restriction,
    Student,
};
use lectern_core::error::DomainError;
use lectern_core::events::NotificationKind;
use lectern_core::traits::NewAppointment;

use crate::dto::{
    AppointmentResponse, AppointmentStatsResponse, CancelAppointmentRequest, CreateFollowUpRequest,
    ProposeRescheduleRequest, RecordOutcomeRequest, RespondRescheduleRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notify::spawn_notification;

/// Appointment lifecycle service
pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    /// Create a new AppointmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Lecturer approves a pending request
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        lecturer_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<AppointmentResponse> {
        let mut appointment = self.owned_by_lecturer(lecturer_id, appointment_id).await?;

        appointment.apply(AppointmentAction::Approve { by: lecturer_id })?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(appointment_id = %appointment.id, "Appointment approved");

        let (student, lecturer) = self.parties(&appointment).await?;
        self.write_message(
            &appointment,
            format!(
                "Your appointment on {} at {} was approved.",
                appointment.date, appointment.start_time
            ),
        )
        .await;
        spawn_notification(
            self.ctx.notifier(),
            NotificationKind::Approved,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Either party cancels, with a mandatory reason
    #[instrument(skip(self, request))]
    pub async fn cancel(
        &self,
        actor_id: Uuid,
        role: Role,
        appointment_id: Uuid,
        request: CancelAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let mut appointment = match role {
            Role::Lecturer => self.owned_by_lecturer(actor_id, appointment_id).await?,
            Role::Student => self.owned_by_student(actor_id, appointment_id).await?,
        };

        appointment.apply(AppointmentAction::Cancel {
            by: actor_id,
            reason: request.reason,
        })?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(appointment_id = %appointment.id, "Appointment cancelled");

        let (student, lecturer) = self.parties(&appointment).await?;
        if role == Role::Lecturer {
            self.write_message(
                &appointment,
                format!(
                    "Your appointment on {} at {} was cancelled by the lecturer.",
                    appointment.date, appointment.start_time
                ),
            )
            .await;
        }
        spawn_notification(
            self.ctx.notifier(),
            NotificationKind::Cancelled,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Lecturer proposes a new time for an approved appointment
    #[instrument(skip(self, request))]
    pub async fn propose_reschedule(
        &self,
        lecturer_id: Uuid,
        appointment_id: Uuid,
        request: ProposeRescheduleRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let mut appointment = self.owned_by_lecturer(lecturer_id, appointment_id).await?;

        appointment.apply(AppointmentAction::ProposeReschedule {
            by: lecturer_id,
            plan: ReschedulePlan {
                date: request.date,
                start_time: request.start_time,
                end_time: request.end_time,
                reason: request.reason,
            },
        })?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(appointment_id = %appointment.id, "Reschedule proposed");

        let (student, lecturer) = self.parties(&appointment).await?;
        self.write_message(
            &appointment,
            format!(
                "The lecturer proposed moving your appointment to {} at {}. Please accept or decline.",
                request.date, request.start_time
            ),
        )
        .await;
        spawn_notification(
            self.ctx.notifier(),
            NotificationKind::Rescheduled,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Student accepts or declines a reschedule proposal.
    ///
    /// Accepting moves the appointment to the proposed time; the storage
    /// unique index still guards the target slot, so a race surfaces as
    /// `SlotAlreadyTaken` and the proposal stays open.
    #[instrument(skip(self, request))]
    pub async fn respond_reschedule(
        &self,
        student_id: Uuid,
        appointment_id: Uuid,
        request: RespondRescheduleRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let mut appointment = self.owned_by_student(student_id, appointment_id).await?;

        let (action, kind) = if request.accept {
            (
                AppointmentAction::AcceptReschedule { by: student_id },
                NotificationKind::Approved,
            )
        } else {
            (
                AppointmentAction::DeclineReschedule { by: student_id },
                NotificationKind::Cancelled,
            )
        };

        appointment.apply(action)?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(
            appointment_id = %appointment.id,
            accepted = request.accept,
            "Reschedule answered"
        );

        let (student, lecturer) = self.parties(&appointment).await?;
        spawn_notification(
            self.ctx.notifier(),
            kind,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Lecturer records whether an approved meeting actually happened.
    ///
    /// Recording a missed meeting creates a booking restriction for the
    /// student against this lecturer.
    #[instrument(skip(self, request))]
    pub async fn record_outcome(
        &self,
        lecturer_id: Uuid,
        appointment_id: Uuid,
        request: RecordOutcomeRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let mut appointment = self.owned_by_lecturer(lecturer_id, appointment_id).await?;

        let outcome = if request.held {
            MeetingOutcome::Held { note: request.note }
        } else {
            MeetingOutcome::NotHeld { note: request.note }
        };
        let missed = outcome.triggers_restriction();

        appointment.apply(AppointmentAction::RecordOutcome {
            by: lecturer_id,
            outcome,
        })?;
        self.ctx.appointment_repo().update(&appointment).await?;

        if missed {
            let restriction = Restriction::starting(
                appointment.student_id,
                lecturer_id,
                self.ctx.today(),
                self.ctx.booking().restriction_days,
            );
            self.ctx.restriction_repo().insert(&restriction).await?;

            info!(
                appointment_id = %appointment.id,
                until = %restriction.end_date,
                "Missed meeting recorded, booking restricted"
            );

            self.write_message(
                &appointment,
                format!(
                    "Your meeting on {} was recorded as not held. You cannot book this lecturer until {}.",
                    appointment.date, restriction.end_date
                ),
            )
            .await;
        } else {
            info!(appointment_id = %appointment.id, "Meeting recorded as held");
        }

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Lecturer creates a follow-up meeting, approved on creation.
    ///
    /// Follow-ups are not bound to published availability or the slot
    /// duration, but the unique index still rejects a start-time collision
    /// with another live appointment.
    #[instrument(skip(self, request))]
    pub async fn create_follow_up(
        &self,
        lecturer_id: Uuid,
        request: CreateFollowUpRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let lecturer = self
            .ctx
            .lecturer_repo()
            .find_by_id(lecturer_id)
            .await?
            .ok_or(DomainError::LecturerNotFound(lecturer_id))?;

        let student = self
            .ctx
            .student_repo()
            .find_by_id(request.student_id)
            .await?
            .ok_or(DomainError::StudentNotFound(request.student_id))?;

        if request.start_time >= request.end_time {
            return Err(DomainError::InvalidRange {
                start: request.start_time,
                end: request.end_time,
            }
            .into());
        }
        if request.date < self.ctx.today() {
            return Err(ServiceError::validation("Cannot schedule a date in the past"));
        }

        let appointment = Appointment::follow_up(
            lecturer.id,
            student.id,
            request.date,
            request.start_time,
            request.end_time,
            request.subject,
            request.message,
        );

        self.ctx
            .appointment_repo()
            .insert(&NewAppointment {
                appointment: appointment.clone(),
            })
            .await?;

        info!(
            appointment_id = %appointment.id,
            student_id = %student.id,
            "Follow-up meeting created"
        );

        self.write_message(
            &appointment,
            format!(
                "A follow-up meeting was scheduled for you on {} at {}.",
                appointment.date, appointment.start_time
            ),
        )
        .await;
        spawn_notification(
            self.ctx.notifier(),
            NotificationKind::Created,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// One appointment, visible only to its parties
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        actor_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<AppointmentResponse> {
        let appointment = self.load(appointment_id).await?;
        if appointment.lecturer_id != actor_id && appointment.student_id != actor_id {
            return Err(ServiceError::not_found(
                "Appointment",
                appointment_id.to_string(),
            ));
        }
        Ok(AppointmentResponse::from(&appointment))
    }

    /// A lecturer's appointments with one status, newest date first
    #[instrument(skip(self))]
    pub async fn list_for_lecturer(
        &self,
        lecturer_id: Uuid,
        status: &str,
    ) -> ServiceResult<Vec<AppointmentResponse>> {
        let appointments = self
            .ctx
            .appointment_repo()
            .find_by_lecturer_status(lecturer_id, status)
            .await?;
        Ok(appointments.iter().map(AppointmentResponse::from).collect())
    }

    /// A student's appointments with one status, newest date first
    #[instrument(skip(self))]
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
        status: &str,
    ) -> ServiceResult<Vec<AppointmentResponse>> {
        let appointments = self
            .ctx
            .appointment_repo()
            .find_by_student_status(student_id, status)
            .await?;
        Ok(appointments.iter().map(AppointmentResponse::from).collect())
    }

    /// Per-status counts for a lecturer's dashboard
    #[instrument(skip(self))]
    pub async fn stats_for_lecturer(
        &self,
        lecturer_id: Uuid,
    ) -> ServiceResult<AppointmentStatsResponse> {
        let counts = self.ctx.appointment_repo().count_by_lecturer(lecturer_id).await?;
        Ok(AppointmentStatsResponse::from_counts(&counts))
    }

    /// Per-status counts for a student's dashboard
    #[instrument(skip(self))]
    pub async fn stats_for_student(
        &self,
        student_id: Uuid,
    ) -> ServiceResult<AppointmentStatsResponse> {
        let counts = self.ctx.appointment_repo().count_by_student(student_id).await?;
        Ok(AppointmentStatsResponse::from_counts(&counts))
    }

    async fn load(&self, appointment_id: Uuid) -> ServiceResult<Appointment> {
        self.ctx
            .appointment_repo()
            .find_by_id(appointment_id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(appointment_id).into())
    }

    async fn owned_by_lecturer(
        &self,
        lecturer_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<Appointment> {
        let appointment = self.load(appointment_id).await?;
        if appointment.lecturer_id != lecturer_id {
            return Err(ServiceError::permission_denied(
                "appointment belongs to another lecturer",
            ));
        }
        Ok(appointment)
    }

    async fn owned_by_student(
        &self,
        student_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<Appointment> {
        let appointment = self.load(appointment_id).await?;
        if appointment.student_id != student_id {
            return Err(ServiceError::permission_denied(
                "appointment belongs to another student",
            ));
        }
        Ok(appointment)
    }

    async fn parties(&self, appointment: &Appointment) -> ServiceResult<(Student, Lecturer)> {
        let student = self
            .ctx
            .student_repo()
            .find_by_id(appointment.student_id)
            .await?
            .ok_or(DomainError::StudentNotFound(appointment.student_id))?;
        let lecturer = self
            .ctx
            .lecturer_repo()
            .find_by_id(appointment.lecturer_id)
            .await?
            .ok_or(DomainError::LecturerNotFound(appointment.lecturer_id))?;
        Ok((student, lecturer))
    }

    /// Best-effort in-app message to the student; a write failure is logged
    /// and never fails the transition that triggered it
    async fn write_message(&self, appointment: &Appointment, content: String) {
        let message = Message::new(appointment.lecturer_id, appointment.student_id, content);
        if let Err(e) = self.ctx.message_repo().insert(&message).await {
            warn!(
                appointment_id = %appointment.id,
                error = %e,
                "Failed to write in-app message"
            );
        }
    }
}
