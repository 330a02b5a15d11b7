//! Availability database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for availability table.
///
/// Free-time windows for the date are stored as a JSONB array of
/// `{start, end}` objects in `ranges`.
#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityModel {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub date: NaiveDate,
    pub ranges: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
