//! Service layer for scheduling business logic.
//!
//! These modules operate on [`crate::models::ScheduleGrid`] state: pure
//! conflict queries, commit validation, auto-selection, and the per-assignment
//! editor workflow. None of them perform I/O.

pub mod autoselect;
pub mod conflicts;
pub mod editor;
pub mod validation;

pub use autoselect::{apply_auto_selection, AutoSelection};
pub use conflicts::{doctor_conflict, is_room_available, ConflictSite, DoctorConflict};
pub use editor::{AssignmentEditor, EditorError, EditorPhase};
pub use validation::{validate_assignment, ValidationIssue, ValidationReport, ValidationRule};
