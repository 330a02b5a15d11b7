//! Student entity <-> model mapper

use lectern_core::entities::Student;

use crate::models::StudentModel;

impl From<StudentModel> for Student {
    fn from(model: StudentModel) -> Self {
        Student {
            id: model.id,
            name: model.name,
            email: model.email,
            faculty_id: model.faculty_id,
            department_id: model.department_id,
            year: model.year,
            created_at: model.created_at,
        }
    }
}
