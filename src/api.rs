//! Public API surface for the Rust backend.
//!
//! This file consolidates the identifier newtypes and the DTO types shared
//! between the engine, the persistence boundary, and the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::services::conflicts::{ConflictSite, DoctorConflict};
pub use crate::services::validation::{ValidationIssue, ValidationReport, ValidationRule};

use serde::{Deserialize, Serialize};

/// Department identifier (server-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub i64);

/// Time-slot identifier (one day × work-session cell of the weekly grid).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub i64);

/// Exam type identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamTypeId(pub i64);

/// Specialty identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialtyId(pub i64);

/// Room-assignment identifier, assigned by the grid when an assignment is
/// created. Conflict self-matching is done by this identity, never by doctor
/// code alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub i64);

/// Persisted schedule record identifier (repository primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl DepartmentId {
    pub fn new(value: i64) -> Self {
        DepartmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl SlotId {
    pub fn new(value: i64) -> Self {
        SlotId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ExamTypeId {
    pub fn new(value: i64) -> Self {
        ExamTypeId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl SpecialtyId {
    pub fn new(value: i64) -> Self {
        SpecialtyId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AssignmentId {
    pub fn new(value: i64) -> Self {
        AssignmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl RecordId {
    pub fn new(value: i64) -> Self {
        RecordId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DepartmentId> for i64 {
    fn from(id: DepartmentId) -> Self {
        id.0
    }
}

impl From<SlotId> for i64 {
    fn from(id: SlotId) -> Self {
        id.0
    }
}

/// Canonical room identity key.
///
/// Produced exclusively by [`crate::models::room::normalize_room_id`]; every
/// set-membership check in the grid operates on this key, never on raw
/// catalog fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomKey(String);

impl RoomKey {
    /// Wrap an already-normalized, non-empty key.
    pub(crate) fn new(value: String) -> Self {
        debug_assert!(!value.trim().is_empty());
        RoomKey(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Doctor employee code: the true identity key for conflict matching.
/// Display names are not reliable; two doctors may share a name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DoctorCode(String);

impl DoctorCode {
    /// Create a doctor code. Returns `None` for empty/whitespace-only input:
    /// a code-less doctor cannot participate in conflict matching.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(DoctorCode(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DoctorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssignmentId, DepartmentId, DoctorCode, RoomKey, SlotId};

    #[test]
    fn test_department_id_new() {
        let id = DepartmentId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_slot_id_equality() {
        let id1 = SlotId::new(100);
        let id2 = SlotId::new(100);
        let id3 = SlotId::new(101);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_slot_id_ordering() {
        let id1 = SlotId::new(1);
        let id2 = SlotId::new(2);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_assignment_id_display() {
        let id = AssignmentId::new(7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_ids_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(SlotId::new(1));
        set.insert(SlotId::new(2));
        set.insert(SlotId::new(1)); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_doctor_code_trims() {
        let code = DoctorCode::new("  E001 ").unwrap();
        assert_eq!(code.as_str(), "E001");
    }

    #[test]
    fn test_doctor_code_rejects_blank() {
        assert!(DoctorCode::new("").is_none());
        assert!(DoctorCode::new("   ").is_none());
    }

    #[test]
    fn test_room_key_display() {
        let key = RoomKey::new("R1".to_string());
        assert_eq!(key.to_string(), "R1");
        assert_eq!(key.as_str(), "R1");
    }
}
