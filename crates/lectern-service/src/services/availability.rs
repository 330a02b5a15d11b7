//! Availability publishing service
//!
//! Lecturers publish per-day time ranges that the slot engine carves into
//! bookable slots. Publishing replaces the whole day; optional weekly
//! recurrence stamps the same ranges onto following weeks.

use chrono::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use lectern_core::entities::Availability;
use lectern_core::error::DomainError;
use lectern_core::value_objects::TimeRange;

use crate::dto::{AvailabilityResponse, SetAvailabilityRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Recurrence never extends past one year from the anchor date
const MAX_RECURRENCE_DAYS: i64 = 365;

/// Availability publishing service
pub struct AvailabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvailabilityService<'a> {
    /// Create a new AvailabilityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish (or replace) a lecturer's availability for a date.
    ///
    /// With `repeat_weekly_until` set, the same ranges are stamped onto every
    /// 7th day up to and including that date, capped at one year out. Each
    /// written day replaces whatever was published for it before.
    #[instrument(skip(self, request))]
    pub async fn set(
        &self,
        lecturer_id: Uuid,
        request: SetAvailabilityRequest,
    ) -> ServiceResult<Vec<AvailabilityResponse>> {
        if request.date < self.ctx.today() {
            return Err(ServiceError::validation(
                "Cannot publish availability for a past date",
            ));
        }

        let ranges = request
            .ranges
            .iter()
            .map(|r| TimeRange::new(r.start, r.end))
            .collect::<Result<Vec<_>, _>>()?;

        let mut dates = vec![request.date];
        if let Some(until) = request.repeat_weekly_until {
            if until < request.date {
                return Err(ServiceError::validation(
                    "repeat_weekly_until must not precede the date",
                ));
            }
            let cap = request.date + Duration::days(MAX_RECURRENCE_DAYS);
            let mut next = request.date + Duration::days(7);
            while next <= until && next <= cap {
                dates.push(next);
                next += Duration::days(7);
            }
        }

        let mut written = Vec::with_capacity(dates.len());
        for date in dates {
            // Overlap validation happens per day; every day gets the same
            // ranges so only the first can actually fail.
            let availability = Availability::new(lecturer_id, date, ranges.clone())?;
            self.ctx.availability_repo().upsert(&availability).await?;
            written.push(AvailabilityResponse::from(&availability));
        }

        info!(
            lecturer_id = %lecturer_id,
            date = %request.date,
            days = written.len(),
            "Availability published"
        );

        Ok(written)
    }

    /// Remove a lecturer's published availability for a date.
    ///
    /// Existing appointments on the date are untouched; removing availability
    /// only stops new bookings.
    #[instrument(skip(self))]
    pub async fn delete(&self, lecturer_id: Uuid, date: chrono::NaiveDate) -> ServiceResult<()> {
        self.ctx.availability_repo().delete(lecturer_id, date).await?;
        info!(lecturer_id = %lecturer_id, date = %date, "Availability removed");
        Ok(())
    }

    /// A lecturer's published days from today onward
    #[instrument(skip(self))]
    pub async fn list(&self, lecturer_id: Uuid) -> ServiceResult<Vec<AvailabilityResponse>> {
        let lecturer = self.ctx.lecturer_repo().find_by_id(lecturer_id).await?;
        if lecturer.is_none() {
            return Err(DomainError::LecturerNotFound(lecturer_id).into());
        }

        let days = self
            .ctx
            .availability_repo()
            .list_by_lecturer(lecturer_id, self.ctx.today())
            .await?;
        Ok(days.iter().map(AvailabilityResponse::from).collect())
    }
}
