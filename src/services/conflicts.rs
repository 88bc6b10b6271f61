//! Conflict detection over grid state.
//!
//! Pure functions: they read the grid and return conflict descriptions,
//! never mutating anything. The grid's own mutation paths re-check these
//! invariants as a backstop, so a stale UI can never corrupt the grid.

use serde::{Deserialize, Serialize};

use crate::api::{AssignmentId, DepartmentId, DoctorCode, RoomKey, SlotId};
use crate::models::grid::{CellKey, ScheduleGrid};

/// One existing booking that collides with a candidate selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSite {
    pub cell: CellKey,
    pub assignment: AssignmentId,
    pub room: RoomKey,
    pub room_name: String,
}

/// Result of a doctor double-booking check.
///
/// The UI-facing contract is hard prevention: a doctor with
/// `has_conflict && !is_current_assignment` must be rendered unselectable,
/// not merely warned about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorConflict {
    pub has_conflict: bool,
    /// True when the assignment under edit itself already holds this doctor.
    pub is_current_assignment: bool,
    /// Conflicting bookings within the requesting department.
    pub same_department: Vec<ConflictSite>,
    /// Conflicting bookings in other departments.
    pub other_departments: Vec<ConflictSite>,
}

impl DoctorConflict {
    /// Whether the doctor may be selected for the assignment under edit.
    pub fn selectable(&self) -> bool {
        !self.has_conflict
    }
}

/// Check whether a room is free in a slot.
///
/// False iff the room is used by some cell in the slot other than
/// `excluding_cell` (the cell whose own assignment is being replaced).
pub fn is_room_available(
    grid: &ScheduleGrid,
    room: &RoomKey,
    slot: SlotId,
    excluding_cell: Option<CellKey>,
) -> bool {
    match grid.occupying_cell(slot, room) {
        Some(cell) => excluding_cell == Some(cell),
        None => true,
    }
}

/// Find every booking of a doctor in a slot, across all departments.
///
/// `excluding` is the assignment currently open for editing: self-matching is
/// excluded by assignment identity, not by doctor code, so replacing one
/// booking with another in the same swap cannot hide a real conflict.
pub fn doctor_conflict(
    grid: &ScheduleGrid,
    code: &DoctorCode,
    slot: SlotId,
    department: DepartmentId,
    excluding: Option<AssignmentId>,
) -> DoctorConflict {
    let mut same_department = Vec::new();
    let mut other_departments = Vec::new();
    let mut is_current_assignment = false;

    for (cell, assignment) in grid.slot_assignments(slot) {
        if assignment.doctor.as_ref() != Some(code) {
            continue;
        }
        if excluding == Some(assignment.id) {
            is_current_assignment = true;
            continue;
        }
        let site = ConflictSite {
            cell,
            assignment: assignment.id,
            room: assignment.room.clone(),
            room_name: assignment.room_name.clone(),
        };
        if cell.department == department {
            same_department.push(site);
        } else {
            other_departments.push(site);
        }
    }

    DoctorConflict {
        has_conflict: !same_department.is_empty() || !other_departments.is_empty(),
        is_current_assignment,
        same_department,
        other_departments,
    }
}
