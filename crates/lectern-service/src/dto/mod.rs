//! Data transfer objects
//!
//! Request DTOs deserialize and validate API input; response DTOs shape
//! entities for API output.

mod requests;
mod responses;

pub use requests::{
    CancelAppointmentRequest, CreateAppointmentRequest, CreateFollowUpRequest,
    ProposeRescheduleRequest, RecordOutcomeRequest, RespondRescheduleRequest,
    SetAvailabilityRequest, TimeRangeDto,
};
pub use responses::{
    AppointmentResponse, AppointmentStatsResponse, AvailabilityResponse, DaySlotsResponse,
    DepartmentResponse, FacultyResponse, LecturerResponse, MessageResponse, OutcomeResponse,
    RescheduleResponse, RestrictionStatusResponse, SlotResponse, TimeRangeResponse,
};
