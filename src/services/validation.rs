//! Commit validation for room assignments.
//!
//! Every broken rule yields its own [`ValidationIssue`] so the editor can
//! surface all violations simultaneously; there is no single generic
//! "invalid" error.

use serde::{Deserialize, Serialize};

use crate::models::assignment::RoomAssignment;
use crate::models::exam::Department;
use crate::models::grid::CellKey;
use crate::models::slot::TimeSlot;

/// The commit rules, one variant per rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    ExamTypeRequired,
    SpecialtyRequired,
    SpecialtyNotEnabled,
    DoctorRequired,
    InvalidTimeRange,
    InvalidCapacity,
    HoldExceedsCapacity,
}

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule: ValidationRule,
    pub field_name: Option<String>,
    pub current_value: Option<String>,
    pub expected_value: Option<String>,
    pub description: String,
}

impl ValidationIssue {
    fn new(rule: ValidationRule, description: impl Into<String>) -> Self {
        Self {
            rule,
            field_name: None,
            current_value: None,
            expected_value: None,
            description: description.into(),
        }
    }

    fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field_name = Some(field.into());
        self
    }

    fn with_values(mut self, current: impl ToString, expected: impl Into<String>) -> Self {
        self.current_value = Some(current.to_string());
        self.expected_value = Some(expected.into());
        self
    }
}

/// Validation result for one assignment editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub cell: CellKey,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check an assignment against all commit rules.
///
/// `department` supplies the exam-type reference data for the specialty
/// rules; `slot` supplies the default window the effective time range falls
/// back to.
pub fn validate_assignment(
    assignment: &RoomAssignment,
    slot: &TimeSlot,
    department: &Department,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match assignment.exam_type {
        None => {
            issues.push(
                ValidationIssue::new(ValidationRule::ExamTypeRequired, "An exam type is required")
                    .with_field("exam_type"),
            );
        }
        Some(exam_type_id) => {
            if let Some(exam_type) = department.exam_type(exam_type_id) {
                match assignment.specialty {
                    None if !exam_type.specialties.is_empty() => {
                        issues.push(
                            ValidationIssue::new(
                                ValidationRule::SpecialtyRequired,
                                format!("Exam type '{}' requires a specialty", exam_type.name),
                            )
                            .with_field("specialty"),
                        );
                    }
                    Some(specialty_id) if !exam_type.has_specialty(specialty_id) => {
                        issues.push(
                            ValidationIssue::new(
                                ValidationRule::SpecialtyNotEnabled,
                                format!(
                                    "Selected specialty is not enabled for exam type '{}'",
                                    exam_type.name
                                ),
                            )
                            .with_field("specialty"),
                        );
                    }
                    _ => {}
                }
            }
        }
    }

    if assignment.doctor.is_none() {
        issues.push(
            ValidationIssue::new(ValidationRule::DoctorRequired, "A doctor is required")
                .with_field("doctor"),
        );
    }

    let window = assignment.effective_window(slot);
    if !window.is_valid() {
        issues.push(
            ValidationIssue::new(
                ValidationRule::InvalidTimeRange,
                "Start time must be before end time",
            )
            .with_field("window")
            .with_values(window, "start < end"),
        );
    }

    if assignment.capacity < 1 {
        issues.push(
            ValidationIssue::new(
                ValidationRule::InvalidCapacity,
                "Appointment capacity must be at least 1",
            )
            .with_field("capacity")
            .with_values(assignment.capacity, ">= 1"),
        );
    }

    if assignment.hold_count >= assignment.capacity {
        issues.push(
            ValidationIssue::new(
                ValidationRule::HoldExceedsCapacity,
                "Hold count must be less than capacity",
            )
            .with_field("hold_count")
            .with_values(
                assignment.hold_count,
                format!("< {} (capacity)", assignment.capacity),
            ),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AssignmentId, DepartmentId, DoctorCode, ExamTypeId, SlotId, SpecialtyId};
    use crate::config::ShiftConfig;
    use crate::models::exam::{ExamType, Specialty};
    use crate::models::room::Room;
    use crate::models::slot::{TimeWindow, WorkSession};
    use chrono::NaiveDate;

    fn slot() -> TimeSlot {
        TimeSlot::new(
            SlotId::new(1),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            WorkSession::Morning,
            &ShiftConfig::default(),
        )
    }

    fn department() -> Department {
        Department::new(DepartmentId::new(1), "Pediatrics")
            .with_exam_type(
                ExamType::new(ExamTypeId::new(1), "Consultation")
                    .with_specialty(Specialty::new(SpecialtyId::new(10), "Pediatrics General"))
                    .with_specialty(Specialty::new(SpecialtyId::new(11), "Neonatology")),
            )
            .with_exam_type(ExamType::new(ExamTypeId::new(2), "Screening"))
    }

    fn assignment() -> RoomAssignment {
        let room = Room::new("R1", "Exam 1");
        RoomAssignment::from_room(AssignmentId::new(1), room.key().unwrap(), &room, 20)
    }

    fn complete_assignment() -> RoomAssignment {
        let mut a = assignment();
        a.exam_type = Some(ExamTypeId::new(1));
        a.specialty = Some(SpecialtyId::new(10));
        a.doctor = DoctorCode::new("E001");
        a.capacity = 10;
        a.hold_count = 2;
        a
    }

    #[test]
    fn test_complete_assignment_passes() {
        let issues = validate_assignment(&complete_assignment(), &slot(), &department());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_three_violations_yield_three_issues() {
        // Missing exam type, missing doctor, hold >= capacity.
        let mut a = assignment();
        a.capacity = 10;
        a.hold_count = 10;

        let issues = validate_assignment(&a, &slot(), &department());
        assert_eq!(issues.len(), 3);
        let rules: Vec<_> = issues.iter().map(|i| i.rule).collect();
        assert!(rules.contains(&ValidationRule::ExamTypeRequired));
        assert!(rules.contains(&ValidationRule::DoctorRequired));
        assert!(rules.contains(&ValidationRule::HoldExceedsCapacity));
    }

    #[test]
    fn test_hold_equal_to_capacity_is_rejected() {
        let mut a = complete_assignment();
        a.capacity = 10;
        a.hold_count = 10;

        let issues = validate_assignment(&a, &slot(), &department());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, ValidationRule::HoldExceedsCapacity);
        assert!(issues[0].description.contains("less than capacity"));
    }

    #[test]
    fn test_specialty_required_when_exam_type_has_specialties() {
        let mut a = complete_assignment();
        a.specialty = None;

        let issues = validate_assignment(&a, &slot(), &department());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, ValidationRule::SpecialtyRequired);
    }

    #[test]
    fn test_specialty_not_required_for_specialtyless_exam_type() {
        let mut a = complete_assignment();
        a.exam_type = Some(ExamTypeId::new(2)); // "Screening" has no specialties
        a.specialty = None;

        let issues = validate_assignment(&a, &slot(), &department());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_foreign_specialty_rejected() {
        let mut a = complete_assignment();
        a.specialty = Some(SpecialtyId::new(99));

        let issues = validate_assignment(&a, &slot(), &department());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, ValidationRule::SpecialtyNotEnabled);
    }

    #[test]
    fn test_custom_window_validated() {
        let mut a = complete_assignment();
        // Construct an inverted window directly; TimeWindow::new refuses it,
        // which is exactly what a deserialized legacy payload bypasses.
        a.window = Some(TimeWindow {
            start: chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        });

        let issues = validate_assignment(&a, &slot(), &department());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, ValidationRule::InvalidTimeRange);
    }

    #[test]
    fn test_zero_capacity_flagged_once_for_capacity_rule() {
        let mut a = complete_assignment();
        a.capacity = 0;
        a.hold_count = 0;

        let issues = validate_assignment(&a, &slot(), &department());
        let rules: Vec<_> = issues.iter().map(|i| i.rule).collect();
        assert!(rules.contains(&ValidationRule::InvalidCapacity));
        // hold 0 >= capacity 0 also fires; both are real violations.
        assert!(rules.contains(&ValidationRule::HoldExceedsCapacity));
        assert_eq!(issues.len(), 2);
    }
}
