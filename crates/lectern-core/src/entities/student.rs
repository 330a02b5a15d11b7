//! Student entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Student entity
///
/// The id matches the identity issued by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    /// Year of study, free-form ("3", "Hazırlık", ...)
    pub year: Option<String>,
    pub created_at: DateTime<Utc>,
}
