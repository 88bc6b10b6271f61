//! Auto-selection of exam type and specialty.
//!
//! When the department enables exactly one exam type, or the chosen exam type
//! enables exactly one specialty, the editor pre-fills the selection to save
//! clicks. Auto-selection only ever fills empty fields; it never overrides a
//! choice the user already made.

use crate::api::{ExamTypeId, SpecialtyId};
use crate::models::assignment::AssignmentConfig;
use crate::models::exam::Department;

/// What an auto-selection pass filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoSelection {
    pub exam_type: Option<ExamTypeId>,
    pub specialty: Option<SpecialtyId>,
}

impl AutoSelection {
    pub fn is_empty(&self) -> bool {
        self.exam_type.is_none() && self.specialty.is_none()
    }
}

/// Fill single-candidate selections into `config`.
///
/// Deterministic: the same department data and config always produce the same
/// result, and a field that already holds a value is left untouched.
pub fn apply_auto_selection(config: &mut AssignmentConfig, department: &Department) -> AutoSelection {
    let mut selected = AutoSelection::default();

    if config.exam_type.is_none() && department.exam_types.len() == 1 {
        let only = department.exam_types[0].id;
        config.exam_type = Some(only);
        selected.exam_type = Some(only);
    }

    if config.specialty.is_none() {
        if let Some(exam_type) = config.exam_type.and_then(|id| department.exam_type(id)) {
            if exam_type.specialties.len() == 1 {
                let only = exam_type.specialties[0].id;
                config.specialty = Some(only);
                selected.specialty = Some(only);
            }
        }
    }

    selected
}
