//! Availability entity <-> model mapper
//!
//! Time ranges travel as a JSONB array; a row whose payload does not parse
//! back into valid ranges surfaces as a storage error rather than silently
//! losing windows.

use lectern_core::entities::Availability;
use lectern_core::error::DomainError;
use lectern_core::value_objects::TimeRange;

use crate::models::AvailabilityModel;

impl TryFrom<AvailabilityModel> for Availability {
    type Error = DomainError;

    fn try_from(model: AvailabilityModel) -> Result<Self, Self::Error> {
        let ranges: Vec<TimeRange> = serde_json::from_value(model.ranges).map_err(|e| {
            DomainError::Storage(format!(
                "availability {} has malformed ranges payload: {e}",
                model.id
            ))
        })?;

        Ok(Availability {
            id: model.id,
            lecturer_id: model.lecturer_id,
            date: model.date,
            ranges,
            updated_at: model.updated_at,
        })
    }
}

/// Serialize ranges for JSONB storage
pub fn ranges_to_json(ranges: &[TimeRange]) -> serde_json::Value {
    serde_json::to_value(ranges).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}
