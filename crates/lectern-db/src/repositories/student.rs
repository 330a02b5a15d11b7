//! PostgreSQL implementation of StudentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Student;
use lectern_core::traits::{RepoResult, StudentRepository};

use crate::models::StudentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of StudentRepository
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    /// Create a new PgStudentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Student>> {
        let result = sqlx::query_as::<_, StudentModel>(
            r#"
            SELECT id, name, email, faculty_id, department_id, year, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Student::from))
    }
}
