//! Repository traits and persisted record types.
//!
//! The engine consumes two black-box collaborators: the directory fetch
//! (rooms and doctors) and the clinic-schedule persistence service. Both are
//! abstracted behind async traits so backends can be swapped; the in-memory
//! [`LocalRepository`](crate::db::LocalRepository) implements both for unit
//! testing and local development.

use async_trait::async_trait;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::api::{DoctorCode, ExamTypeId, RecordId, SpecialtyId};
use crate::models::assignment::RoomAssignment;
use crate::models::doctor::Doctor;
use crate::models::grid::{CellKey, ScheduleGrid};
use crate::models::room::{Room, RoomFilter};
use crate::models::slot::TimeWindow;

/// A committed room assignment as the persistence service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Persistence primary key; absent until the record is created.
    #[serde(default)]
    pub id: Option<RecordId>,
    pub room_id: String,
    pub department_id: i64,
    #[serde(default)]
    pub exam_type_id: Option<ExamTypeId>,
    #[serde(default)]
    pub specialty_id: Option<SpecialtyId>,
    #[serde(default)]
    pub doctor_code: Option<DoctorCode>,
    /// ISO weekday number, Monday = 1.
    pub day_of_week: u32,
    pub window: TimeWindow,
    pub capacity: u32,
    pub hold_count: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: String,
    /// ISO week number of the schedule the record belongs to.
    pub week: u32,
    pub year: i32,
    #[serde(default)]
    pub zone_name: Option<String>,
}

impl AssignmentRecord {
    /// Flatten one grid assignment into its persisted form.
    pub fn from_assignment(
        cell: CellKey,
        weekday: Weekday,
        window: TimeWindow,
        assignment: &RoomAssignment,
        week: u32,
        year: i32,
    ) -> Self {
        Self {
            id: None,
            room_id: assignment.room.as_str().to_string(),
            department_id: cell.department.value(),
            exam_type_id: assignment.exam_type,
            specialty_id: assignment.specialty,
            doctor_code: assignment.doctor.clone(),
            day_of_week: weekday.number_from_monday(),
            window,
            capacity: assignment.capacity,
            hold_count: assignment.hold_count,
            duration_minutes: assignment.duration_minutes,
            notes: assignment.notes.clone(),
            week,
            year,
            zone_name: assignment.zone_name.clone(),
        }
    }
}

/// Flatten the whole grid into a commit batch for one schedule week.
///
/// Each assignment is recorded with its effective window (custom window or
/// the slot's session default).
pub fn collect_batch(grid: &ScheduleGrid, week: u32, year: i32) -> Vec<AssignmentRecord> {
    grid.assignments()
        .filter_map(|(cell, assignment)| {
            let slot = grid.slot(cell.slot)?;
            Some(AssignmentRecord::from_assignment(
                cell,
                slot.weekday(),
                assignment.effective_window(slot),
                assignment,
                week,
                year,
            ))
        })
        .collect()
}

/// Query filter for persisted schedule records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub week: u32,
    pub year: i32,
    /// Optional zone filter.
    #[serde(default)]
    pub zone: Option<String>,
}

impl ScheduleQuery {
    pub fn new(week: u32, year: i32) -> Self {
        Self {
            week,
            year,
            zone: None,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn matches(&self, record: &AssignmentRecord) -> bool {
        if record.week != self.week || record.year != self.year {
            return false;
        }
        match &self.zone {
            Some(zone) => record.zone_name.as_deref() == Some(zone.as_str()),
            None => true,
        }
    }
}

/// Directory fetch collaborator: rooms and doctors.
///
/// Read-only reference data. Errors must be surfaced, never swallowed into
/// empty results, so callers can distinguish "empty" from "fetch failed".
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Fetch the room catalog, optionally filtered by zone/department.
    async fn fetch_rooms(&self, filter: Option<&RoomFilter>) -> RepositoryResult<Vec<Room>>;

    /// Fetch the doctor directory.
    async fn fetch_doctors(&self) -> RepositoryResult<Vec<Doctor>>;
}

/// Clinic-schedule persistence collaborator.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist a batch of committed assignment records, returning the
    /// assigned record ids in input order.
    async fn create_assignments(
        &self,
        batch: Vec<AssignmentRecord>,
    ) -> RepositoryResult<Vec<RecordId>>;

    /// Update one persisted record.
    async fn update_assignment(
        &self,
        id: RecordId,
        record: AssignmentRecord,
    ) -> RepositoryResult<()>;

    /// Delete one persisted record.
    async fn delete_assignment(&self, id: RecordId) -> RepositoryResult<()>;

    /// Query persisted records by week, year, and optional zone.
    async fn query_assignments(
        &self,
        query: &ScheduleQuery,
    ) -> RepositoryResult<Vec<AssignmentRecord>>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Combined repository interface: directory fetch plus schedule persistence.
pub trait FullRepository: DirectoryProvider + ScheduleRepository {}

impl<T: DirectoryProvider + ScheduleRepository> FullRepository for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DepartmentId, SlotId};
    use crate::config::ShiftConfig;
    use crate::models::slot::{TimeSlot, WorkSession};
    use chrono::NaiveDate;

    #[test]
    fn test_collect_batch_uses_effective_windows() {
        let shifts = ShiftConfig::default();
        let slot = TimeSlot::new(
            SlotId::new(1),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), // Monday
            WorkSession::Morning,
            &shifts,
        );
        let mut grid = ScheduleGrid::new(vec![slot], 20);
        let dept = DepartmentId::new(1);
        grid.add_room(dept, SlotId::new(1), &Room::new("R1", "Exam 1"))
            .unwrap();

        let batch = collect_batch(&grid, 10, 2025);
        assert_eq!(batch.len(), 1);
        let record = &batch[0];
        assert_eq!(record.room_id, "R1");
        assert_eq!(record.day_of_week, 1); // Monday
        assert_eq!(record.week, 10);
        assert_eq!(record.year, 2025);
        assert_eq!(
            record.window,
            ShiftConfig::default().window_for(WorkSession::Morning)
        );
    }

    #[test]
    fn test_query_matches_week_year_zone() {
        let record = AssignmentRecord {
            id: None,
            room_id: "R1".to_string(),
            department_id: 1,
            exam_type_id: None,
            specialty_id: None,
            doctor_code: None,
            day_of_week: 1,
            window: TimeWindow::parse("08:00", "12:00").unwrap(),
            capacity: 5,
            hold_count: 1,
            duration_minutes: 20,
            notes: String::new(),
            week: 10,
            year: 2025,
            zone_name: Some("East Wing".to_string()),
        };

        assert!(ScheduleQuery::new(10, 2025).matches(&record));
        assert!(!ScheduleQuery::new(11, 2025).matches(&record));
        assert!(ScheduleQuery::new(10, 2025)
            .with_zone("East Wing")
            .matches(&record));
        assert!(!ScheduleQuery::new(10, 2025)
            .with_zone("West Wing")
            .matches(&record));
    }
}
