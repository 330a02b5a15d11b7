//! In-app message handlers

use axum::{extract::State, Json};
use lectern_service::dto::MessageResponse;
use lectern_service::MessageService;
use serde::Serialize;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Response for the mark-viewed endpoint
#[derive(Debug, Serialize)]
pub struct MarkViewedResponse {
    pub updated: u64,
}

/// List own messages, newest first
///
/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    auth.require_student()?;

    let service = MessageService::new(state.service_context());
    let response = service.list_for_student(auth.user_id).await?;
    Ok(Json(response))
}

/// Mark all own messages as viewed
///
/// POST /messages/viewed
pub async fn mark_viewed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkViewedResponse>> {
    auth.require_student()?;

    let service = MessageService::new(state.service_context());
    let updated = service.mark_viewed(auth.user_id).await?;
    Ok(Json(MarkViewedResponse { updated }))
}
