//! Exam types, specialties, and department reference data.

use crate::api::{DepartmentId, ExamTypeId, SpecialtyId};
use serde::{Deserialize, Serialize};

/// A medical specialty enabled under an exam type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
}

impl Specialty {
    pub fn new(id: SpecialtyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An exam type with its enabled specialty set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamType {
    pub id: ExamTypeId,
    pub name: String,
    /// Specialties enabled for this exam type. A selected specialty must
    /// belong to this set.
    #[serde(default)]
    pub specialties: Vec<Specialty>,
}

impl ExamType {
    pub fn new(id: ExamTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            specialties: Vec::new(),
        }
    }

    pub fn with_specialty(mut self, specialty: Specialty) -> Self {
        self.specialties.push(specialty);
        self
    }

    pub fn has_specialty(&self, id: SpecialtyId) -> bool {
        self.specialties.iter().any(|s| s.id == id)
    }
}

/// A department with its enabled exam types, the reference data a cell
/// editor operates against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub exam_types: Vec<ExamType>,
}

impl Department {
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            exam_types: Vec::new(),
        }
    }

    pub fn with_exam_type(mut self, exam_type: ExamType) -> Self {
        self.exam_types.push(exam_type);
        self
    }

    pub fn exam_type(&self, id: ExamTypeId) -> Option<&ExamType> {
        self.exam_types.iter().find(|e| e.id == id)
    }
}
