//! Availability handlers
//!
//! Lecturers publish, list and withdraw their bookable time windows.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use lectern_service::dto::{AvailabilityResponse, SetAvailabilityRequest};
use lectern_service::AvailabilityService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Publish (or replace) availability for a date
///
/// PUT /availability
pub async fn set_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SetAvailabilityRequest>,
) -> ApiResult<Json<Vec<AvailabilityResponse>>> {
    auth.require_lecturer()?;

    let service = AvailabilityService::new(state.service_context());
    let response = service.set(auth.user_id, request).await?;
    Ok(Json(response))
}

/// List own published availability from today onward
///
/// GET /availability
pub async fn list_availability(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AvailabilityResponse>>> {
    auth.require_lecturer()?;

    let service = AvailabilityService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Withdraw availability for a date
///
/// DELETE /availability/{date}
pub async fn delete_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> ApiResult<NoContent> {
    auth.require_lecturer()?;

    let service = AvailabilityService::new(state.service_context());
    service.delete(auth.user_id, date).await?;
    Ok(NoContent)
}
