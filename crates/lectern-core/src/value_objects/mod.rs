//! Value objects - immutable types that represent domain concepts

mod time_range;

pub use time_range::{validate_ranges, TimeRange};
