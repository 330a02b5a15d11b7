//! PostgreSQL implementation of AppointmentRepository
//!
//! Inserts and updates can both trip the partial unique index over
//! `(lecturer_id, date, start_time)` on non-cancelled rows; both map the
//! rejection to `SlotAlreadyTaken` so races lose cleanly.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Appointment;
use lectern_core::error::DomainError;
use lectern_core::traits::{AppointmentRepository, NewAppointment, RepoResult};

use crate::mappers::AppointmentColumns;
use crate::models::AppointmentModel;

use super::error::{appointment_not_found, map_db_error, map_unique_violation};

const APPOINTMENT_COLUMNS: &str = r"id, lecturer_id, student_id, date, start_time, end_time,
    subject, message, status, processed_by, processed_at, cancel_reason,
    rescheduled_date, rescheduled_start, rescheduled_end, reschedule_reason,
    meeting_status, meeting_note, follow_up, created_at";

/// PostgreSQL implementation of AppointmentRepository
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new PgAppointmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        let result = sqlx::query_as::<_, AppointmentModel>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Appointment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Vec<Appointment>> {
        let results = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE lecturer_id = $1 AND date = $2 AND status <> 'cancelled'
            ORDER BY start_time ASC"
        ))
        .bind(lecturer_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Appointment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_lecturer_status(
        &self,
        lecturer_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>> {
        let results = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE lecturer_id = $1 AND status = $2
            ORDER BY date DESC, start_time DESC"
        ))
        .bind(lecturer_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Appointment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_student_status(
        &self,
        student_id: Uuid,
        status: &str,
    ) -> RepoResult<Vec<Appointment>> {
        let results = sqlx::query_as::<_, AppointmentModel>(&format!(
            r"SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE student_id = $1 AND status = $2
            ORDER BY date DESC, start_time DESC"
        ))
        .bind(student_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Appointment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_lecturer(&self, lecturer_id: Uuid) -> RepoResult<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM appointments
            WHERE lecturer_id = $1
            GROUP BY status
            "#,
        )
        .bind(lecturer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_student(&self, student_id: Uuid) -> RepoResult<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM appointments
            WHERE student_id = $1
            GROUP BY status
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, new))]
    async fn insert(&self, new: &NewAppointment) -> RepoResult<()> {
        let appointment = &new.appointment;
        let columns = AppointmentColumns::from(appointment);

        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, lecturer_id, student_id, date, start_time, end_time,
                subject, message, status, processed_by, processed_at, cancel_reason,
                rescheduled_date, rescheduled_start, rescheduled_end, reschedule_reason,
                meeting_status, meeting_note, follow_up, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.lecturer_id)
        .bind(appointment.student_id)
        .bind(appointment.date)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(&appointment.subject)
        .bind(&appointment.message)
        .bind(columns.status)
        .bind(columns.processed_by)
        .bind(columns.processed_at)
        .bind(columns.cancel_reason)
        .bind(columns.rescheduled_date)
        .bind(columns.rescheduled_start)
        .bind(columns.rescheduled_end)
        .bind(columns.reschedule_reason)
        .bind(columns.meeting_status)
        .bind(columns.meeting_note)
        .bind(appointment.follow_up)
        .bind(appointment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::SlotAlreadyTaken {
                date: appointment.date,
                start: appointment.start_time,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, appointment))]
    async fn update(&self, appointment: &Appointment) -> RepoResult<()> {
        let columns = AppointmentColumns::from(appointment);

        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET date = $2, start_time = $3, end_time = $4,
                status = $5, processed_by = $6, processed_at = $7, cancel_reason = $8,
                rescheduled_date = $9, rescheduled_start = $10, rescheduled_end = $11,
                reschedule_reason = $12, meeting_status = $13, meeting_note = $14
            WHERE id = $1
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.date)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(columns.status)
        .bind(columns.processed_by)
        .bind(columns.processed_at)
        .bind(columns.cancel_reason)
        .bind(columns.rescheduled_date)
        .bind(columns.rescheduled_start)
        .bind(columns.rescheduled_end)
        .bind(columns.reschedule_reason)
        .bind(columns.meeting_status)
        .bind(columns.meeting_note)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::SlotAlreadyTaken {
                date: appointment.date,
                start: appointment.start_time,
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(appointment_not_found(appointment.id));
        }

        Ok(())
    }
}
