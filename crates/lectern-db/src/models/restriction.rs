//! Restriction database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for restrictions table
#[derive(Debug, Clone, FromRow)]
pub struct RestrictionModel {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lecturer_id: Uuid,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
