//! Restriction entity - a temporary booking block after a missed meeting

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Blocks one student from booking one lecturer until `end_date` has passed.
///
/// Created when a lecturer records an approved meeting as not held; expires
/// naturally once the current date passes `end_date`. Overlapping rows for the
/// same pair are legal; blocking only needs an existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lecturer_id: Uuid,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Restriction {
    /// Create a new Restriction ending `days` days after `today`
    pub fn starting(student_id: Uuid, lecturer_id: Uuid, today: NaiveDate, days: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            lecturer_id,
            end_date: today + chrono::Duration::days(i64::from(days)),
            created_at: Utc::now(),
        }
    }

    /// Whether this restriction still blocks bookings as of `today`
    #[inline]
    pub fn blocks(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }
}
