//! Lecturer entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lecturer entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub faculty_id: Uuid,
    pub department_id: Uuid,
    pub created_at: DateTime<Utc>,
}
