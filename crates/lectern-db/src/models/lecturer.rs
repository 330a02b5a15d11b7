//! Lecturer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for lecturers table
#[derive(Debug, Clone, FromRow)]
pub struct LecturerModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub faculty_id: Uuid,
    pub department_id: Uuid,
    pub created_at: DateTime<Utc>,
}
