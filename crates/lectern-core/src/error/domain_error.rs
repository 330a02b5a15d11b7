//! Domain errors - error types for the domain layer

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::TimeRange;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    #[error("Lecturer not found: {0}")]
    LecturerNotFound(Uuid),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("No availability published for lecturer {lecturer_id} on {date}")]
    AvailabilityNotFound { lecturer_id: Uuid, date: NaiveDate },

    #[error("Faculty not found: {0}")]
    FacultyNotFound(Uuid),

    #[error("Department not found: {0}")]
    DepartmentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveTime, end: NaiveTime },

    #[error("Availability ranges overlap: {first:?} and {second:?}")]
    OverlappingRanges { first: TimeRange, second: TimeRange },

    #[error("Requested time {start} on {date} is outside published availability")]
    SlotNotOffered { date: NaiveDate, start: NaiveTime },

    // =========================================================================
    // Conflict / Business Rule Violations
    // =========================================================================
    #[error("Slot {start} on {date} is already taken")]
    SlotAlreadyTaken { date: NaiveDate, start: NaiveTime },

    #[error("Booking blocked for this lecturer until {until}")]
    RestrictionActive { until: NaiveDate },

    #[error("Cannot {action} an appointment in state {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Meeting outcome already recorded")]
    OutcomeAlreadyRecorded,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::StudentNotFound(_) => "UNKNOWN_STUDENT",
            Self::LecturerNotFound(_) => "UNKNOWN_LECTURER",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",
            Self::AvailabilityNotFound { .. } => "UNKNOWN_AVAILABILITY",
            Self::FacultyNotFound(_) => "UNKNOWN_FACULTY",
            Self::DepartmentNotFound(_) => "UNKNOWN_DEPARTMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRange { .. } => "INVALID_TIME_RANGE",
            Self::OverlappingRanges { .. } => "OVERLAPPING_RANGES",
            Self::SlotNotOffered { .. } => "SLOT_NOT_OFFERED",

            // Conflict / business rules
            Self::SlotAlreadyTaken { .. } => "SLOT_ALREADY_TAKEN",
            Self::RestrictionActive { .. } => "RESTRICTION_ACTIVE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::OutcomeAlreadyRecorded => "OUTCOME_ALREADY_RECORDED",

            // Infrastructure
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound(_)
                | Self::LecturerNotFound(_)
                | Self::AppointmentNotFound(_)
                | Self::AvailabilityNotFound { .. }
                | Self::FacultyNotFound(_)
                | Self::DepartmentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRange { .. }
                | Self::OverlappingRanges { .. }
                | Self::SlotNotOffered { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SlotAlreadyTaken { .. }
                | Self::RestrictionActive { .. }
                | Self::InvalidTransition { .. }
                | Self::OutcomeAlreadyRecorded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn time() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_error_codes() {
        let err = DomainError::SlotAlreadyTaken {
            date: date(),
            start: time(),
        };
        assert_eq!(err.code(), "SLOT_ALREADY_TAKEN");

        let err = DomainError::RestrictionActive { until: date() };
        assert_eq!(err.code(), "RESTRICTION_ACTIVE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::StudentNotFound(Uuid::nil()).is_not_found());
        assert!(!DomainError::OutcomeAlreadyRecorded.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::RestrictionActive { until: date() }.is_conflict());
        assert!(DomainError::InvalidTransition {
            state: "cancelled",
            action: "approve"
        }
        .is_conflict());
        assert!(!DomainError::ValidationError("x".into()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::RestrictionActive { until: date() };
        assert_eq!(
            err.to_string(),
            "Booking blocked for this lecturer until 2025-03-10"
        );
    }
}
