//! TimeRange value object - a lecturer-declared free-time window
//!
//! Clock times are naive HH:MM values in the institution's local timezone.
//! The engine performs no timezone conversion.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A half-open free-time window `[start, end)` within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Create a new TimeRange, rejecting `start >= end`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DomainError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Check the start < end invariant
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start >= self.end {
            return Err(DomainError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Half-open interval overlap test
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Duration of the range in whole minutes
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Validate a set of ranges belonging to one availability record.
///
/// Each range must satisfy start < end, and no two ranges may overlap.
/// Range order within the set is irrelevant.
pub fn validate_ranges(ranges: &[TimeRange]) -> Result<(), DomainError> {
    for range in ranges {
        range.validate()?;
    }

    let mut sorted: Vec<&TimeRange> = ranges.iter().collect();
    sorted.sort_by_key(|r| r.start);
    for pair in sorted.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(DomainError::OverlappingRanges {
                first: *pair[0],
                second: *pair[1],
            });
        }
    }

    Ok(())
}
