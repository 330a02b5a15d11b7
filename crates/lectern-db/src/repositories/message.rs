//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lectern_core::entities::Message;
use lectern_core::traits::{MessageRepository, RepoResult};

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message))]
    async fn insert(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, lecturer_id, student_id, content, viewed_by_student, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(message.lecturer_id)
        .bind(message.student_id)
        .bind(&message.content)
        .bind(message.viewed_by_student)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_student(&self, student_id: Uuid) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, lecturer_id, student_id, content, viewed_by_student, created_at
            FROM messages
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_viewed(&self, student_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET viewed_by_student = TRUE
            WHERE student_id = $1 AND viewed_by_student = FALSE
            "#,
        )
        .bind(student_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
