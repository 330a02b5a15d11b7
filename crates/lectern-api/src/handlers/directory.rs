//! Directory handlers
//!
//! Faculties, departments and the lecturer listing.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use lectern_service::dto::{DepartmentResponse, FacultyResponse, LecturerResponse};
use lectern_service::DirectoryService;
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Query filters for the lecturer listing
#[derive(Debug, Deserialize)]
pub struct LecturerQuery {
    pub faculty_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
}

/// List all faculties
///
/// GET /faculties
pub async fn list_faculties(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<FacultyResponse>>> {
    let service = DirectoryService::new(state.service_context());
    let response = service.list_faculties().await?;
    Ok(Json(response))
}

/// List departments of a faculty
///
/// GET /faculties/{faculty_id}/departments
pub async fn list_departments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(faculty_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let service = DirectoryService::new(state.service_context());
    let response = service.list_departments(faculty_id).await?;
    Ok(Json(response))
}

/// List lecturers, annotated with the calling student's restrictions
///
/// GET /lecturers
pub async fn list_lecturers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LecturerQuery>,
) -> ApiResult<Json<Vec<LecturerResponse>>> {
    auth.require_student()?;

    let service = DirectoryService::new(state.service_context());
    let response = service
        .list_lecturers(query.faculty_id, query.department_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
