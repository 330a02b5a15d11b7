//! Faculty and department database models

use sqlx::FromRow;
use uuid::Uuid;

/// Database model for faculties table
#[derive(Debug, Clone, FromRow)]
pub struct FacultyModel {
    pub id: Uuid,
    pub name: String,
}

/// Database model for departments table
#[derive(Debug, Clone, FromRow)]
pub struct DepartmentModel {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub name: String,
}
