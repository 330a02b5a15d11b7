//! PostgreSQL implementation of RestrictionRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Restriction;
use lectern_core::traits::{RepoResult, RestrictionRepository};

use crate::models::RestrictionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RestrictionRepository
#[derive(Clone)]
pub struct PgRestrictionRepository {
    pool: PgPool,
}

impl PgRestrictionRepository {
    /// Create a new PgRestrictionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestrictionRepository for PgRestrictionRepository {
    #[instrument(skip(self))]
    async fn find_active(
        &self,
        student_id: Uuid,
        lecturer_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>> {
        let results = sqlx::query_as::<_, RestrictionModel>(
            r#"
            SELECT id, student_id, lecturer_id, end_date, created_at
            FROM restrictions
            WHERE student_id = $1 AND lecturer_id = $2 AND end_date >= $3
            ORDER BY end_date DESC
            "#,
        )
        .bind(student_id)
        .bind(lecturer_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Restriction::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_for_student(
        &self,
        student_id: Uuid,
        today: NaiveDate,
    ) -> RepoResult<Vec<Restriction>> {
        let results = sqlx::query_as::<_, RestrictionModel>(
            r#"
            SELECT id, student_id, lecturer_id, end_date, created_at
            FROM restrictions
            WHERE student_id = $1 AND end_date >= $2
            ORDER BY end_date DESC
            "#,
        )
        .bind(student_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Restriction::from).collect())
    }

    #[instrument(skip(self, restriction))]
    async fn insert(&self, restriction: &Restriction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO restrictions (id, student_id, lecturer_id, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(restriction.id)
        .bind(restriction.student_id)
        .bind(restriction.lecturer_id)
        .bind(restriction.end_date)
        .bind(restriction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRestrictionRepository>();
    }
}
