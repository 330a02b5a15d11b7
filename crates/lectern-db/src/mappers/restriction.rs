//! Restriction entity <-> model mapper

use lectern_core::entities::Restriction;

use crate::models::RestrictionModel;

impl From<RestrictionModel> for Restriction {
    fn from(model: RestrictionModel) -> Self {
        Restriction {
            id: model.id,
            student_id: model.student_id,
            lecturer_id: model.lecturer_id,
            end_date: model.end_date,
            created_at: model.created_at,
        }
    }
}
