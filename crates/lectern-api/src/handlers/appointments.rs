//! Appointment handlers
//!
//! Booking, lifecycle transitions and listings for both roles.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use lectern_common::Role;
use lectern_service::dto::{
    AppointmentResponse, AppointmentStatsResponse, CancelAppointmentRequest,
    CreateAppointmentRequest, CreateFollowUpRequest, ProposeRescheduleRequest,
    RecordOutcomeRequest, RespondRescheduleRequest,
};
use lectern_service::{AppointmentService, BookingService};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

const STATUSES: [&str; 4] = [
    "pending",
    "approved",
    "awaiting_student_approval",
    "cancelled",
];

/// Status selector for listings
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

impl StatusQuery {
    fn status(&self) -> Result<&str, ApiError> {
        if STATUSES.contains(&self.status.as_str()) {
            Ok(self.status.as_str())
        } else {
            Err(ApiError::invalid_query(format!(
                "Unknown status: {}",
                self.status
            )))
        }
    }
}

/// Book a slot
///
/// POST /appointments
pub async fn book(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> ApiResult<Created<Json<AppointmentResponse>>> {
    auth.require_student()?;

    let service = BookingService::new(state.service_context());
    let response = service.book(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get one appointment
///
/// GET /appointments/{appointment_id}
pub async fn get_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let response = service.get(auth.user_id, appointment_id).await?;
    Ok(Json(response))
}

/// List own appointments with one status
///
/// GET /appointments?status=pending
pub async fn list_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Vec<AppointmentResponse>>> {
    let status = query.status()?;
    let service = AppointmentService::new(state.service_context());
    let response = match auth.role {
        Role::Lecturer => service.list_for_lecturer(auth.user_id, status).await?,
        Role::Student => service.list_for_student(auth.user_id, status).await?,
    };
    Ok(Json(response))
}

/// Per-status counts of own appointments
///
/// GET /appointments/stats
pub async fn appointment_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AppointmentStatsResponse>> {
    let service = AppointmentService::new(state.service_context());
    let response = match auth.role {
        Role::Lecturer => service.stats_for_lecturer(auth.user_id).await?,
        Role::Student => service.stats_for_student(auth.user_id).await?,
    };
    Ok(Json(response))
}

/// Approve a pending request
///
/// POST /appointments/{appointment_id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
) -> ApiResult<Json<AppointmentResponse>> {
    auth.require_lecturer()?;

    let service = AppointmentService::new(state.service_context());
    let response = service.approve(auth.user_id, appointment_id).await?;
    Ok(Json(response))
}

/// Cancel an appointment
///
/// POST /appointments/{appointment_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CancelAppointmentRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    let service = AppointmentService::new(state.service_context());
    let response = service
        .cancel(auth.user_id, auth.role, appointment_id, request)
        .await?;
    Ok(Json(response))
}

/// Propose a new time for an approved appointment
///
/// POST /appointments/{appointment_id}/reschedule
pub async fn propose_reschedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ProposeRescheduleRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    auth.require_lecturer()?;

    let service = AppointmentService::new(state.service_context());
    let response = service
        .propose_reschedule(auth.user_id, appointment_id, request)
        .await?;
    Ok(Json(response))
}

/// Accept or decline a reschedule proposal
///
/// POST /appointments/{appointment_id}/reschedule/respond
pub async fn respond_reschedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RespondRescheduleRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    auth.require_student()?;

    let service = AppointmentService::new(state.service_context());
    let response = service
        .respond_reschedule(auth.user_id, appointment_id, request)
        .await?;
    Ok(Json(response))
}

/// Record whether an approved meeting actually happened
///
/// POST /appointments/{appointment_id}/outcome
pub async fn record_outcome(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RecordOutcomeRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    auth.require_lecturer()?;

    let service = AppointmentService::new(state.service_context());
    let response = service
        .record_outcome(auth.user_id, appointment_id, request)
        .await?;
    Ok(Json(response))
}

/// Create a follow-up meeting, approved on creation
///
/// POST /appointments/follow-up
pub async fn create_follow_up(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateFollowUpRequest>,
) -> ApiResult<Created<Json<AppointmentResponse>>> {
    auth.require_lecturer()?;

    let service = AppointmentService::new(state.service_context());
    let response = service.create_follow_up(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
