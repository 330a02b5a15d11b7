//! Student database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for students table
#[derive(Debug, Clone, FromRow)]
pub struct StudentModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub year: Option<String>,
    pub created_at: DateTime<Utc>,
}
