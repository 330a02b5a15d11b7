//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub viewed_by_student: bool,
    pub created_at: DateTime<Utc>,
}
