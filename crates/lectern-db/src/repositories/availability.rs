//! PostgreSQL implementation of AvailabilityRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Availability;
use lectern_core::traits::{AvailabilityRepository, RepoResult};

use crate::mappers::ranges_to_json;
use crate::models::AvailabilityModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AvailabilityRepository
#[derive(Clone)]
pub struct PgAvailabilityRepository {
    pool: PgPool,
}

impl PgAvailabilityRepository {
    /// Create a new PgAvailabilityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PgAvailabilityRepository {
    #[instrument(skip(self))]
    async fn find_by_lecturer_date(
        &self,
        lecturer_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Option<Availability>> {
        let result = sqlx::query_as::<_, AvailabilityModel>(
            r#"
            SELECT id, lecturer_id, date, ranges, updated_at
            FROM availability
            WHERE lecturer_id = $1 AND date = $2
            "#,
        )
        .bind(lecturer_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Availability::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_lecturer(
        &self,
        lecturer_id: Uuid,
        from: NaiveDate,
    ) -> RepoResult<Vec<Availability>> {
        let results = sqlx::query_as::<_, AvailabilityModel>(
            r#"
            SELECT id, lecturer_id, date, ranges, updated_at
            FROM availability
            WHERE lecturer_id = $1 AND date >= $2
            ORDER BY date ASC
            "#,
        )
        .bind(lecturer_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Availability::try_from).collect()
    }

    #[instrument(skip(self, availability))]
    async fn upsert(&self, availability: &Availability) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO availability (id, lecturer_id, date, ranges, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (lecturer_id, date)
            DO UPDATE SET ranges = EXCLUDED.ranges, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(availability.id)
        .bind(availability.lecturer_id)
        .bind(availability.date)
        .bind(ranges_to_json(&availability.ranges))
        .bind(availability.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, lecturer_id: Uuid, date: NaiveDate) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM availability
            WHERE lecturer_id = $1 AND date = $2
            "#,
        )
        .bind(lecturer_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
