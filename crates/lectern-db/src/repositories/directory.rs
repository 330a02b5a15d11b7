//! PostgreSQL implementation of DirectoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::{Department, Faculty};
use lectern_core::traits::{DirectoryRepository, RepoResult};

use crate::models::{DepartmentModel, FacultyModel};

use super::error::map_db_error;

/// PostgreSQL implementation of DirectoryRepository
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    /// Create a new PgDirectoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryRepository for PgDirectoryRepository {
    #[instrument(skip(self))]
    async fn list_faculties(&self) -> RepoResult<Vec<Faculty>> {
        let results = sqlx::query_as::<_, FacultyModel>(
            r#"
            SELECT id, name
            FROM faculties
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Faculty::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_departments(&self, faculty_id: Uuid) -> RepoResult<Vec<Department>> {
        let results = sqlx::query_as::<_, DepartmentModel>(
            r#"
            SELECT id, faculty_id, name
            FROM departments
            WHERE faculty_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Department::from).collect())
    }
}
