//! Slot browsing handlers
//!
//! Students browse a lecturer's open slots and check their own restriction
//! status before booking.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use lectern_service::dto::{DaySlotsResponse, RestrictionStatusResponse};
use lectern_service::BookingService;
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Date selector for the slot listing
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

/// List open slots of one lecturer on one date
///
/// GET /lecturers/{lecturer_id}/slots?date=YYYY-MM-DD
pub async fn list_open_slots(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lecturer_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> ApiResult<Json<DaySlotsResponse>> {
    auth.require_student()?;

    let service = BookingService::new(state.service_context());
    let response = service.list_open_slots(lecturer_id, query.date).await?;
    Ok(Json(response))
}

/// Whether the calling student is blocked from booking this lecturer
///
/// GET /lecturers/{lecturer_id}/restriction
pub async fn restriction_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(lecturer_id): Path<Uuid>,
) -> ApiResult<Json<RestrictionStatusResponse>> {
    auth.require_student()?;

    let service = BookingService::new(state.service_context());
    let response = service.restriction_status(auth.user_id, lecturer_id).await?;
    Ok(Json(response))
}
