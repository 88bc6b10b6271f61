//! Doctor directory model.

use crate::api::{DepartmentId, DoctorCode, SpecialtyId};
use serde::{Deserialize, Serialize};

/// A doctor, as returned by the doctor fetch collaborator.
///
/// The employee code is the conflict-matching identity. Doctors without one
/// are rejected at directory load: matching by display name is not reliable
/// (two differently-coded doctors can share a name) and would produce
/// false-negative conflict detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// External employee code (conflict identity key).
    pub employee_code: DoctorCode,
    /// Display name.
    pub name: String,
    /// Specialty.
    #[serde(default)]
    pub specialty_id: Option<SpecialtyId>,
    #[serde(default)]
    pub specialty_name: Option<String>,
    /// Home department.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub department_name: Option<String>,
}

impl Doctor {
    pub fn new(employee_code: DoctorCode, name: impl Into<String>) -> Self {
        Self {
            employee_code,
            name: name.into(),
            specialty_id: None,
            specialty_name: None,
            department_id: None,
            department_name: None,
        }
    }

    pub fn with_specialty(mut self, id: SpecialtyId, name: impl Into<String>) -> Self {
        self.specialty_id = Some(id);
        self.specialty_name = Some(name.into());
        self
    }

    pub fn with_department(mut self, id: DepartmentId, name: impl Into<String>) -> Self {
        self.department_id = Some(id);
        self.department_name = Some(name.into());
        self
    }
}

/// Raw directory entry prior to employee-code validation.
///
/// The fetch collaborator may return entries without a code; [`Doctor`]
/// requires one, so deserialization goes through this intermediate shape.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorEntry {
    #[serde(default)]
    pub employee_code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialty_id: Option<SpecialtyId>,
    #[serde(default)]
    pub specialty_name: Option<String>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub department_name: Option<String>,
}

impl DoctorEntry {
    /// Promote to a [`Doctor`] if the entry carries a usable employee code.
    pub fn into_doctor(self) -> Option<Doctor> {
        let code = DoctorCode::new(self.employee_code?)?;
        Some(Doctor {
            employee_code: code,
            name: self.name,
            specialty_id: self.specialty_id,
            specialty_name: self.specialty_name,
            department_id: self.department_id,
            department_name: self.department_name,
        })
    }
}
