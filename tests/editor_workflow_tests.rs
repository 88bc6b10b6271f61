//! Integration tests for the swap/validate/commit editing workflow:
//! validation completeness, doctor hard prevention, and auto-selection.

use chrono::NaiveDate;

use crs_rust::api::{DepartmentId, DoctorCode, ExamTypeId, RoomKey, SlotId, SpecialtyId};
use crs_rust::config::ShiftConfig;
use crs_rust::models::exam::{Department, ExamType, Specialty};
use crs_rust::models::grid::{CellKey, ScheduleGrid};
use crs_rust::models::room::Room;
use crs_rust::models::slot::week_slots;
use crs_rust::services::conflicts::doctor_conflict;
use crs_rust::services::editor::{AssignmentEditor, EditorError, EditorPhase};
use crs_rust::services::validation::ValidationRule;

const DEPT_A: DepartmentId = DepartmentId(1);
const DEPT_B: DepartmentId = DepartmentId(2);
const S1: SlotId = SlotId(1);

fn week_grid() -> ScheduleGrid {
    let shifts = ShiftConfig::default();
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    ScheduleGrid::new(
        week_slots(monday, &shifts),
        shifts.default_duration_minutes(),
    )
}

/// Radiology: two exam types, one of them with two specialties. Nothing is
/// auto-selected here.
fn radiology(id: DepartmentId) -> Department {
    Department::new(id, "Radiology")
        .with_exam_type(
            ExamType::new(ExamTypeId::new(1), "Ultrasound")
                .with_specialty(Specialty::new(SpecialtyId::new(10), "Obstetric"))
                .with_specialty(Specialty::new(SpecialtyId::new(11), "Abdominal")),
        )
        .with_exam_type(ExamType::new(ExamTypeId::new(2), "X-Ray"))
}

/// Pediatrics: a single exam type with the single specialty
/// "Pediatrics General", i.e. the auto-select case.
fn pediatrics(id: DepartmentId) -> Department {
    Department::new(id, "Pediatrics").with_exam_type(
        ExamType::new(ExamTypeId::new(5), "Consultation")
            .with_specialty(Specialty::new(SpecialtyId::new(50), "Pediatrics General")),
    )
}

fn add_and_open(
    grid: &mut ScheduleGrid,
    department: Department,
    room_id: &str,
) -> (AssignmentEditor, RoomKey) {
    let dept = department.id;
    grid.add_room(dept, S1, &Room::new(room_id, format!("Room {room_id}")))
        .unwrap();
    let key = grid
        .used_room_ids(S1)
        .into_iter()
        .find(|k| k.as_str() == room_id)
        .unwrap();
    let editor = AssignmentEditor::open(grid, department, CellKey::new(dept, S1), &key).unwrap();
    (editor, key)
}

/// Scenario: capacity 10, hold 10. The validator names the broken rule and
/// the commit stays blocked.
#[test]
fn hold_count_at_capacity_blocks_commit() {
    let mut grid = week_grid();
    let (mut editor, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");

    editor.set_exam_type(Some(ExamTypeId::new(2))); // X-Ray, no specialties
    assert!(editor.try_select_doctor(&grid, DoctorCode::new("E001").unwrap()));
    editor.set_capacity(10);
    editor.set_hold_count(10);

    let err = editor.commit(&mut grid).unwrap_err();
    let issues = match err {
        EditorError::Validation(issues) => issues,
        other => panic!("expected validation failure, got {other}"),
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule, ValidationRule::HoldExceedsCapacity);
    assert!(issues[0].description.contains("less than capacity"));
    assert_eq!(editor.phase(), EditorPhase::Editing);

    // Fixing the hold count unblocks the commit.
    editor.set_hold_count(9);
    editor.commit(&mut grid).unwrap();
    assert_eq!(editor.phase(), EditorPhase::Committed);
}

/// Validation completeness: three independent violations produce three
/// messages in one pass, not one generic error.
#[test]
fn all_violated_rules_surface_simultaneously() {
    let mut grid = week_grid();
    let (mut editor, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");

    // No exam type, no doctor, hold >= capacity.
    editor.set_capacity(1);
    editor.set_hold_count(1);

    let err = editor.commit(&mut grid).unwrap_err();
    let issues = match err {
        EditorError::Validation(issues) => issues,
        other => panic!("expected validation failure, got {other}"),
    };
    assert_eq!(issues.len(), 3);
    let rules: Vec<_> = issues.iter().map(|i| i.rule).collect();
    assert!(rules.contains(&ValidationRule::ExamTypeRequired));
    assert!(rules.contains(&ValidationRule::DoctorRequired));
    assert!(rules.contains(&ValidationRule::HoldExceedsCapacity));

    // Warnings mirror the failed attempt until the next edit clears them.
    assert_eq!(editor.warnings().len(), 3);
    editor.set_capacity(5);
    assert!(editor.warnings().is_empty());
}

/// Scenario: doctor E001 committed in dept A / S1. The picker for dept B in
/// the same slot reports the conflict pointing at dept A, and a force-select
/// is rejected without mutating anything.
#[test]
fn doctor_double_booking_is_prevented_across_departments() {
    let mut grid = week_grid();

    let (mut first, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");
    first.set_exam_type(Some(ExamTypeId::new(2)));
    assert!(first.try_select_doctor(&grid, DoctorCode::new("E001").unwrap()));
    first.set_capacity(5);
    first.commit(&mut grid).unwrap();

    // Dept B opens its picker for the same slot.
    let (mut second, _) = add_and_open(&mut grid, radiology(DEPT_B), "R2");
    let code = DoctorCode::new("E001").unwrap();

    let conflict = doctor_conflict(&grid, &code, S1, DEPT_B, Some(second.assignment_id()));
    assert!(conflict.has_conflict);
    assert!(!conflict.selectable());
    assert_eq!(conflict.other_departments.len(), 1);
    assert_eq!(
        conflict.other_departments[0].cell,
        CellKey::new(DEPT_A, S1)
    );

    let draft_before = second.draft().clone();
    assert!(!second.try_select_doctor(&grid, code));
    assert_eq!(second.draft(), &draft_before);
}

/// Scenario: a fresh assignment under a single-exam-type department with a
/// single-specialty exam type opens with both pre-selected.
#[test]
fn fresh_editor_auto_fills_single_candidates() {
    let mut grid = week_grid();
    let (editor, _) = add_and_open(&mut grid, pediatrics(DEPT_A), "R1");

    assert_eq!(editor.draft().exam_type, Some(ExamTypeId::new(5)));
    assert_eq!(editor.draft().specialty, Some(SpecialtyId::new(50)));
}

/// Auto-select determinism: a manual specialty choice is never overwritten
/// by later auto-selection passes.
#[test]
fn manual_choice_survives_auto_selection() {
    let mut grid = week_grid();
    let (mut editor, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");

    editor.set_exam_type(Some(ExamTypeId::new(1)));
    editor.set_specialty(Some(SpecialtyId::new(11))); // manual: Abdominal

    // Editing other fields re-runs nothing that would clobber the choice.
    editor.set_capacity(4);
    editor.set_notes("portable probe");
    assert_eq!(editor.draft().specialty, Some(SpecialtyId::new(11)));
}

/// Changing the exam type resets the dependent specialty and re-applies
/// auto-selection for the new exam type.
#[test]
fn exam_type_change_resets_specialty() {
    let mut grid = week_grid();
    let (mut editor, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");

    editor.set_exam_type(Some(ExamTypeId::new(1)));
    editor.set_specialty(Some(SpecialtyId::new(10)));

    editor.set_exam_type(Some(ExamTypeId::new(2)));
    assert_eq!(editor.draft().specialty, None);
}

/// The full loop: edit, swap, commit, reopen.
#[test]
fn swap_then_commit_round_trip() {
    let mut grid = week_grid();
    let (mut editor, _) = add_and_open(&mut grid, radiology(DEPT_A), "R1");

    editor.set_exam_type(Some(ExamTypeId::new(2)));
    assert!(editor.try_select_doctor(&grid, DoctorCode::new("E001").unwrap()));
    editor.set_capacity(6);

    editor
        .swap_room(&mut grid, &Room::new("R7", "Room R7"))
        .unwrap();
    assert_eq!(editor.room().as_str(), "R7");

    editor.commit(&mut grid).unwrap();
    assert_eq!(editor.phase(), EditorPhase::Committed);

    let stored = grid
        .assignment(CellKey::new(DEPT_A, S1), editor.room())
        .unwrap();
    assert_eq!(stored.capacity, 6);
    assert_eq!(stored.exam_type, Some(ExamTypeId::new(2)));

    // Reopening allows further edits; committing without changes is fine.
    editor.reopen();
    assert_eq!(editor.phase(), EditorPhase::Editing);
    editor.commit(&mut grid).unwrap();
}
