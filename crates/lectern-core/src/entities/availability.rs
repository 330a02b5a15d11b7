//! Availability entity - a lecturer's published free time for one date

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{validate_ranges, TimeRange};

/// Per-lecturer, per-date free-time windows.
///
/// Created or replaced wholesale by the lecturer (upsert keyed by
/// lecturer + date) and deleted explicitly. Ranges are guaranteed
/// pairwise non-overlapping on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub date: NaiveDate,
    pub ranges: Vec<TimeRange>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    /// Create a new Availability, validating the range invariants
    pub fn new(
        lecturer_id: Uuid,
        date: NaiveDate,
        ranges: Vec<TimeRange>,
    ) -> Result<Self, DomainError> {
        validate_ranges(&ranges)?;
        Ok(Self {
            id: Uuid::new_v4(),
            lecturer_id,
            date,
            ranges,
            updated_at: Utc::now(),
        })
    }

    /// Whether any bookable time is published at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
