//! Message entity - an in-app notification from a lecturer to a student
//!
//! Written alongside lecturer-driven appointment transitions so the student
//! sees a summary of what changed and why.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub viewed_by_student: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    pub fn new(lecturer_id: Uuid, student_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            lecturer_id,
            student_id,
            content,
            viewed_by_student: false,
            created_at: Utc::now(),
        }
    }
}
