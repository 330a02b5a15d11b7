//! PostgreSQL implementation of LecturerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Lecturer;
use lectern_core::traits::{LecturerRepository, RepoResult};

use crate::models::LecturerModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LecturerRepository
#[derive(Clone)]
pub struct PgLecturerRepository {
    pool: PgPool,
}

impl PgLecturerRepository {
    /// Create a new PgLecturerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LecturerRepository for PgLecturerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Lecturer>> {
        let result = sqlx::query_as::<_, LecturerModel>(
            r#"
            SELECT id, name, email, faculty_id, department_id, created_at
            FROM lecturers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Lecturer::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        faculty_id: Option<Uuid>,
        department_id: Option<Uuid>,
    ) -> RepoResult<Vec<Lecturer>> {
        let results = sqlx::query_as::<_, LecturerModel>(
            r#"
            SELECT id, name, email, faculty_id, department_id, created_at
            FROM lecturers
            WHERE ($1::uuid IS NULL OR faculty_id = $1)
              AND ($2::uuid IS NULL OR department_id = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(faculty_id)
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Lecturer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLecturerRepository>();
    }
}
