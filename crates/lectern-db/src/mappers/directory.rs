//! Faculty and department entity <-> model mappers

use lectern_core::entities::{Department, Faculty};

use crate::models::{DepartmentModel, FacultyModel};

impl From<FacultyModel> for Faculty {
    fn from(model: FacultyModel) -> Self {
        Faculty {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<DepartmentModel> for Department {
    fn from(model: DepartmentModel) -> Self {
        Department {
            id: model.id,
            faculty_id: model.faculty_id,
            name: model.name,
        }
    }
}
