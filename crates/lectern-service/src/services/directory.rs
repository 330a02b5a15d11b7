//! Directory browsing service
//!
//! Faculties, departments and the lecturer listing students browse before
//! booking. Lecturer entries are annotated with the caller's active
//! restriction so the client can grey them out.

use std::collections::HashMap;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::dto::{DepartmentResponse, FacultyResponse, LecturerResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Directory browsing service
pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    /// Create a new DirectoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All faculties, ordered by name
    #[instrument(skip(self))]
    pub async fn list_faculties(&self) -> ServiceResult<Vec<FacultyResponse>> {
        let faculties = self.ctx.directory_repo().list_faculties().await?;
        Ok(faculties.iter().map(FacultyResponse::from).collect())
    }

    /// Departments of one faculty, ordered by name
    #[instrument(skip(self))]
    pub async fn list_departments(&self, faculty_id: Uuid) -> ServiceResult<Vec<DepartmentResponse>> {
        let departments = self.ctx.directory_repo().list_departments(faculty_id).await?;
        Ok(departments.iter().map(DepartmentResponse::from).collect())
    }

    /// Lecturers, optionally narrowed by faculty/department, annotated with
    /// the calling student's active restriction end date.
    ///
    /// Restriction lookup is advisory here; if it fails the listing still
    /// goes out unannotated and the booking path enforces the block.
    #[instrument(skip(self))]
    pub async fn list_lecturers(
        &self,
        faculty_id: Option<Uuid>,
        department_id: Option<Uuid>,
        student_id: Uuid,
    ) -> ServiceResult<Vec<LecturerResponse>> {
        let lecturers = self
            .ctx
            .lecturer_repo()
            .list(faculty_id, department_id)
            .await?;

        let restricted_until: HashMap<Uuid, chrono::NaiveDate> = match self
            .ctx
            .restriction_repo()
            .find_active_for_student(student_id, self.ctx.today())
            .await
        {
            Ok(active) => {
                let mut latest = HashMap::new();
                for r in active {
                    let entry = latest.entry(r.lecturer_id).or_insert(r.end_date);
                    if r.end_date > *entry {
                        *entry = r.end_date;
                    }
                }
                latest
            }
            Err(e) => {
                warn!(student_id = %student_id, error = %e, "Restriction lookup failed, listing unannotated");
                HashMap::new()
            }
        };

        Ok(lecturers
            .iter()
            .map(|l| {
                let mut response = LecturerResponse::from(l);
                response.restricted_until = restricted_until.get(&l.id).copied();
                response
            })
            .collect())
    }
}
