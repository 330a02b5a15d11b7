//! Lecturer entity <-> model mapper

use lectern_core::entities::Lecturer;

use crate::models::LecturerModel;

impl From<LecturerModel> for Lecturer {
    fn from(model: LecturerModel) -> Self {
        Lecturer {
            id: model.id,
            name: model.name,
            email: model.email,
            faculty_id: model.faculty_id,
            department_id: model.department_id,
            created_at: model.created_at,
        }
    }
}
