//! Faculty and department directory entities
//!
//! Leaf reference data used to filter the lecturer listing.

use uuid::Uuid;

/// Faculty entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
}

/// Department entity, always belonging to a faculty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub name: String,
}
