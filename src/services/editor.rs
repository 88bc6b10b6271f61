//! Per-assignment editing workflow.
//!
//! `AssignmentEditor` drives one assignment through
//! `Idle → Editing → Committed`, with room swapping available only while
//! editing. Field edits land in a draft and reach the grid only through
//! [`AssignmentEditor::commit`], which gates on the full validation rule set.
//! Commit is explicit: the embedding application decides when to call it
//! (immediately, debounced, or behind a save button).

use log::warn;

use crate::api::{AssignmentId, DoctorCode, ExamTypeId, RoomKey, SpecialtyId};
use crate::models::assignment::{AssignmentConfig, RoomAssignment};
use crate::models::exam::Department;
use crate::models::grid::{CellKey, CommandOutcome, GridError, ScheduleGrid};
use crate::models::slot::{TimeSlot, TimeWindow};
use crate::services::autoselect::apply_auto_selection;
use crate::services::conflicts::doctor_conflict;
use crate::services::validation::{validate_assignment, ValidationIssue};

/// Editor lifecycle phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    /// Assignment displayed read-only.
    Idle,
    /// Configuration editor open; all fields mutable.
    Editing,
    /// Draft validated and written to the grid.
    Committed,
}

/// Errors surfaced by the editor workflow. All are recoverable; none mutate
/// the grid.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EditorError {
    #[error("editor is not in the editing phase")]
    NotEditing,

    #[error("validation failed ({} issue(s))", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Editing session for one room assignment.
pub struct AssignmentEditor {
    cell: CellKey,
    assignment: AssignmentId,
    room: RoomKey,
    department: Department,
    draft: AssignmentConfig,
    phase: EditorPhase,
    warnings: Vec<ValidationIssue>,
}

impl AssignmentEditor {
    /// Open the editor on an existing assignment.
    ///
    /// The draft starts from the assignment's current configuration with
    /// single-candidate auto-selection applied (which never overrides values
    /// already present).
    pub fn open(
        grid: &ScheduleGrid,
        department: Department,
        cell: CellKey,
        room: &RoomKey,
    ) -> Result<Self, EditorError> {
        let assignment = grid
            .assignment(cell, room)
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: room.clone(),
            })?;

        let mut draft = assignment.config();
        apply_auto_selection(&mut draft, &department);

        Ok(Self {
            cell,
            assignment: assignment.id,
            room: room.clone(),
            department,
            draft,
            phase: EditorPhase::Editing,
            warnings: Vec::new(),
        })
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn cell(&self) -> CellKey {
        self.cell
    }

    pub fn assignment_id(&self) -> AssignmentId {
        self.assignment
    }

    pub fn room(&self) -> &RoomKey {
        &self.room
    }

    pub fn draft(&self) -> &AssignmentConfig {
        &self.draft
    }

    /// Validation warnings surfaced by the last failed commit attempt.
    /// Cleared by any subsequent field edit; the auto-dismiss timer is the
    /// embedding application's concern.
    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    // ------------------------------------------------------------------
    // Field edits (Editing phase only)
    // ------------------------------------------------------------------

    pub fn set_exam_type(&mut self, exam_type: Option<ExamTypeId>) {
        self.edit(|draft, department| {
            draft.exam_type = exam_type;
            // A changed exam type invalidates the previous specialty choice;
            // a single-specialty exam type re-fills it immediately.
            draft.specialty = None;
            apply_auto_selection(draft, department);
        });
    }

    pub fn set_specialty(&mut self, specialty: Option<SpecialtyId>) {
        self.edit(|draft, _| draft.specialty = specialty);
    }

    pub fn set_window(&mut self, window: Option<TimeWindow>) {
        self.edit(|draft, _| draft.window = window);
    }

    pub fn set_capacity(&mut self, capacity: u32) {
        self.edit(|draft, _| draft.capacity = capacity);
    }

    pub fn set_hold_count(&mut self, hold_count: u32) {
        self.edit(|draft, _| draft.hold_count = hold_count);
    }

    pub fn set_duration_minutes(&mut self, duration_minutes: u32) {
        self.edit(|draft, _| draft.duration_minutes = duration_minutes);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.edit(move |draft, _| draft.notes = notes);
    }

    /// Select a doctor, enforcing the hard-prevention contract.
    ///
    /// Returns `false`, with a log entry and no state change, when the
    /// doctor is already booked elsewhere in this slot. Conflicting doctors
    /// are expected to be rendered unselectable; this rejection is the
    /// boundary for stale UIs that try anyway.
    pub fn try_select_doctor(&mut self, grid: &ScheduleGrid, code: DoctorCode) -> bool {
        if self.phase != EditorPhase::Editing {
            return false;
        }
        let conflict = doctor_conflict(
            grid,
            &code,
            self.cell.slot,
            self.cell.department,
            Some(self.assignment),
        );
        if !conflict.selectable() {
            warn!(
                "rejected doctor {} for {}: already booked in this slot",
                code, self.cell
            );
            return false;
        }
        self.edit(move |draft, _| draft.doctor = Some(code));
        true
    }

    pub fn clear_doctor(&mut self) {
        self.edit(|draft, _| draft.doctor = None);
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Validate the draft without committing.
    pub fn validate(&self, grid: &ScheduleGrid) -> Result<Vec<ValidationIssue>, EditorError> {
        let (draft, slot) = self.draft_assignment(grid)?;
        Ok(validate_assignment(&draft, &slot, &self.department))
    }

    /// Validate and, if every rule passes, write the draft to the grid.
    ///
    /// On failure all violated rules are surfaced at once and the editor
    /// stays in `Editing`; the grid is untouched either way until the write.
    pub fn commit(&mut self, grid: &mut ScheduleGrid) -> Result<(), EditorError> {
        if self.phase != EditorPhase::Editing {
            return Err(EditorError::NotEditing);
        }

        let issues = self.validate(grid)?;
        if !issues.is_empty() {
            self.warnings = issues.clone();
            return Err(EditorError::Validation(issues));
        }

        grid.update_config(
            self.cell.department,
            self.cell.slot,
            &self.room,
            self.draft.clone(),
        )?;
        self.warnings.clear();
        self.phase = EditorPhase::Committed;
        Ok(())
    }

    /// Replace the bound room, preserving the assignment's configuration.
    /// Only available while editing.
    pub fn swap_room(
        &mut self,
        grid: &mut ScheduleGrid,
        replacement: &crate::models::room::Room,
    ) -> Result<CommandOutcome, EditorError> {
        if self.phase != EditorPhase::Editing {
            return Err(EditorError::NotEditing);
        }

        let outcome = grid.swap_room(
            self.cell.department,
            self.cell.slot,
            &self.room,
            replacement,
        )?;
        if let CommandOutcome::Swapped { .. } = &outcome {
            // The grid resolved the replacement's key before accepting it.
            if let Some(key) = replacement.key() {
                self.room = key;
            }
            self.warnings.clear();
        }
        Ok(outcome)
    }

    /// Re-enter editing after a commit.
    pub fn reopen(&mut self) {
        if self.phase == EditorPhase::Committed {
            self.phase = EditorPhase::Editing;
        }
    }

    /// Close the editor, abandoning uncommitted edits. The draft resets to
    /// the grid's current state and the cell's dirty marker is cleared.
    pub fn discard(&mut self, grid: &mut ScheduleGrid) {
        if let Some(current) = grid.assignment(self.cell, &self.room) {
            self.draft = current.config();
        }
        self.warnings.clear();
        grid.clear_pending(self.cell);
        self.phase = EditorPhase::Idle;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply a draft edit. Outside the editing phase this is a no-op: the
    /// assignment is read-only. Any edit clears previously shown warnings;
    /// the rules run again at the next commit attempt.
    fn edit(&mut self, f: impl FnOnce(&mut AssignmentConfig, &Department)) {
        if self.phase != EditorPhase::Editing {
            return;
        }
        f(&mut self.draft, &self.department);
        self.warnings.clear();
    }

    /// Materialize the draft as a full assignment for validation.
    fn draft_assignment(
        &self,
        grid: &ScheduleGrid,
    ) -> Result<(RoomAssignment, TimeSlot), EditorError> {
        let slot = grid
            .slot(self.cell.slot)
            .ok_or(GridError::UnknownSlot(self.cell.slot))?
            .clone();
        let mut assignment = grid
            .assignment(self.cell, &self.room)
            .ok_or_else(|| GridError::UnknownAssignment {
                cell: self.cell,
                room: self.room.clone(),
            })?
            .clone();
        assignment.apply_config(self.draft.clone());
        Ok((assignment, slot))
    }
}
