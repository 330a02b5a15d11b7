//! Slot scheduling engine
//!
//! Turns a lecturer's published free-time ranges into discrete bookable slots,
//! excluding anything that collides with an existing non-cancelled appointment.
//! Everything here is pure: the booking UI re-runs it on every dependency change,
//! and the write path re-derives its own view before committing.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::value_objects::TimeRange;

/// A derived, fixed-duration candidate meeting time.
///
/// Never persisted; always recomputed from availability and appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
///
/// Touching endpoints (one interval ending exactly where the other starts)
/// do not count as overlap.
#[inline]
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Generate bookable slots for one (lecturer, date).
///
/// For each free-time range, step forward in `slot_minutes` increments while the
/// stepped slot still fits inside the range, and drop any candidate that overlaps
/// one of the `busy` intervals (the `[start_time, end_time)` of existing
/// non-cancelled appointments on the same date).
///
/// Ranges are assumed pairwise non-overlapping (enforced when availability is
/// written), which makes duplicate slots impossible. Output is chronologically
/// sorted. An empty range set or a range shorter than one increment produces
/// nothing.
pub fn generate_slots(
    date: NaiveDate,
    ranges: &[TimeRange],
    busy: &[TimeRange],
    slot_minutes: u32,
) -> Vec<Slot> {
    let step = Duration::minutes(i64::from(slot_minutes));
    let mut slots = Vec::new();

    for range in ranges {
        let mut start = range.start;
        loop {
            let end = start + step;
            if end > range.end {
                break;
            }
            // Wrapped past midnight: NaiveTime arithmetic wraps, guard on it
            if end <= start {
                break;
            }

            let taken = busy
                .iter()
                .any(|b| overlaps(start, end, b.start, b.end));
            if !taken {
                slots.push(Slot { date, start, end });
            }

            start = end;
        }
    }

    slots.sort_by_key(|s| s.start);
    slots
}
