//! Booking service
//!
//! The slot listing and the booking commit path. Listing is advisory; the
//! commit path re-derives its own view of availability and lets the storage
//! unique index settle races.

use tracing::{info, instrument};

use lectern_core::entities::Appointment;
use lectern_core::error::DomainError;
use lectern_core::events::NotificationKind;
use lectern_core::schedule::generate_slots;
use lectern_core::traits::NewAppointment;
use lectern_core::value_objects::TimeRange;

use crate::dto::{
    AppointmentResponse, CreateAppointmentRequest, DaySlotsResponse, RestrictionStatusResponse,
    SlotResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notify::spawn_notification;
use chrono::NaiveDate;
use uuid::Uuid;

/// Booking service
pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    /// Create a new BookingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the open slots of one (lecturer, date).
    ///
    /// A date without published availability simply has no slots.
    #[instrument(skip(self))]
    pub async fn list_open_slots(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<DaySlotsResponse> {
        let lecturer = self.ctx.lecturer_repo().find_by_id(lecturer_id).await?;
        if lecturer.is_none() {
            return Err(DomainError::LecturerNotFound(lecturer_id).into());
        }

        let slots = match self
            .ctx
            .availability_repo()
            .find_by_lecturer_date(lecturer_id, date)
            .await?
        {
            Some(availability) => {
                let busy = self.busy_intervals(lecturer_id, date).await?;
                generate_slots(
                    date,
                    &availability.ranges,
                    &busy,
                    self.ctx.booking().slot_minutes,
                )
            }
            None => Vec::new(),
        };

        Ok(DaySlotsResponse {
            lecturer_id,
            date,
            slots: slots.iter().map(SlotResponse::from).collect(),
        })
    }

    /// Whether the student is currently blocked from booking this lecturer
    #[instrument(skip(self))]
    pub async fn restriction_status(
        &self,
        student_id: Uuid,
        lecturer_id: Uuid,
    ) -> ServiceResult<RestrictionStatusResponse> {
        let until = self.active_restriction_end(student_id, lecturer_id).await?;
        Ok(RestrictionStatusResponse {
            restricted: until.is_some(),
            until,
        })
    }

    /// Book a slot for a student.
    ///
    /// The commit path: resolve both parties, reject past dates and active
    /// restrictions, re-check that the requested slot is still offered, then
    /// insert. The partial unique index on non-cancelled rows has the final
    /// word on races; its rejection surfaces as `SlotAlreadyTaken`.
    #[instrument(skip(self, request))]
    pub async fn book(
        &self,
        student_id: Uuid,
        request: CreateAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let lecturer = self
            .ctx
            .lecturer_repo()
            .find_by_id(request.lecturer_id)
            .await?
            .ok_or(DomainError::LecturerNotFound(request.lecturer_id))?;

        let student = self
            .ctx
            .student_repo()
            .find_by_id(student_id)
            .await?
            .ok_or(DomainError::StudentNotFound(student_id))?;

        let today = self.ctx.today();
        if request.date < today {
            return Err(ServiceError::validation("Cannot book a date in the past"));
        }

        if let Some(until) = self
            .active_restriction_end(student_id, lecturer.id)
            .await?
        {
            return Err(DomainError::RestrictionActive { until }.into());
        }

        // Availability re-check: the requested slot must still be derivable
        // from what the lecturer currently publishes.
        let availability = self
            .ctx
            .availability_repo()
            .find_by_lecturer_date(lecturer.id, request.date)
            .await?
            .ok_or(DomainError::SlotNotOffered {
                date: request.date,
                start: request.start_time,
            })?;

        let busy = self.busy_intervals(lecturer.id, request.date).await?;
        let slot_minutes = self.ctx.booking().slot_minutes;
        let open = generate_slots(request.date, &availability.ranges, &busy, slot_minutes);

        let slot = open
            .iter()
            .find(|s| s.start == request.start_time)
            .ok_or(DomainError::SlotNotOffered {
                date: request.date,
                start: request.start_time,
            })?;

        let appointment = Appointment::request(
            lecturer.id,
            student.id,
            slot.date,
            slot.start,
            slot.end,
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
            lecturer_id = %lecturer.id,
            student_id = %student.id,
            date = %appointment.date,
            "Appointment booked"
        );

        spawn_notification(
            self.ctx.notifier(),
            NotificationKind::Created,
            (&appointment).into(),
            (&student).into(),
            (&lecturer).into(),
        );

        Ok(AppointmentResponse::from(&appointment))
    }

    /// Busy intervals for slot generation: non-cancelled appointments of the
    /// lecturer on the date
    async fn busy_intervals(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<Vec<TimeRange>> {
        let active = self
            .ctx
            .appointment_repo()
            .find_active_by_lecturer_date(lecturer_id, date)
            .await?;

        Ok(active
            .iter()
            .map(|a| TimeRange {
                start: a.start_time,
                end: a.end_time,
            })
            .collect())
    }

    /// Latest end date among the pair's active restrictions, if any
    async fn active_restriction_end(
        &self,
        student_id: Uuid,
        lecturer_id: Uuid,
    ) -> ServiceResult<Option<NaiveDate>> {
        let today = self.ctx.today();
        let active = self
            .ctx
            .restriction_repo()
            .find_active(student_id, lecturer_id, today)
            .await?;

        Ok(active.iter().map(|r| r.end_date).max())
    }
}
