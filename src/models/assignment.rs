//! Room assignments, the mutable unit of the schedule grid.

use crate::api::{AssignmentId, DoctorCode, ExamTypeId, RoomKey, SpecialtyId};
use crate::models::room::Room;
use crate::models::slot::{TimeSlot, TimeWindow};
use serde::{Deserialize, Serialize};

/// One configured room within a schedule cell.
///
/// Owned by exactly one cell at a time; moving a room between cells is a
/// delete + insert. The room-derived fields (`room`, `room_name`,
/// `classification`, zone) are a snapshot of the catalog entry and are the
/// only fields replaced by a swap; everything else is the assignment's own
/// configuration and survives the swap untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomAssignment {
    pub id: AssignmentId,
    /// Normalized room identity.
    pub room: RoomKey,
    pub room_name: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub zone_name: Option<String>,
    /// Selected exam type.
    #[serde(default)]
    pub exam_type: Option<ExamTypeId>,
    /// Selected specialty; must belong to the exam type's enabled set.
    #[serde(default)]
    pub specialty: Option<SpecialtyId>,
    /// Selected doctor, by employee code.
    #[serde(default)]
    pub doctor: Option<DoctorCode>,
    /// Custom time window; falls back to the slot's session default.
    #[serde(default)]
    pub window: Option<TimeWindow>,
    /// Maximum bookable appointment slots.
    pub capacity: u32,
    /// Reserved, non-bookable slots; must stay strictly below capacity.
    pub hold_count: u32,
    /// Appointment duration in minutes.
    pub duration_minutes: u32,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl RoomAssignment {
    /// Create a fresh assignment bound to a room.
    ///
    /// `key` must be the normalized identity of `room`; the grid resolves it
    /// before construction so an unresolvable room never gets this far.
    pub fn from_room(id: AssignmentId, key: RoomKey, room: &Room, duration_minutes: u32) -> Self {
        Self {
            id,
            room: key,
            room_name: room.name.clone(),
            classification: room.classification.clone(),
            zone_id: room.zone_id,
            zone_name: room.zone_name.clone(),
            exam_type: None,
            specialty: None,
            doctor: None,
            window: None,
            capacity: 1,
            hold_count: 0,
            duration_minutes,
            notes: String::new(),
        }
    }

    /// Replace the bound room, keeping the assignment's own configuration.
    /// This is swap step (c): the new room's classification and zone
    /// metadata replace the old snapshot.
    pub fn apply_room(&mut self, key: RoomKey, room: &Room) {
        self.room = key;
        self.room_name = room.name.clone();
        self.classification = room.classification.clone();
        self.zone_id = room.zone_id;
        self.zone_name = room.zone_name.clone();
    }

    /// The window this assignment actually occupies: the custom window when
    /// set, otherwise the slot's session default.
    pub fn effective_window(&self, slot: &TimeSlot) -> TimeWindow {
        self.window.unwrap_or(slot.default_window)
    }

    /// Snapshot of the configurable field set.
    pub fn config(&self) -> AssignmentConfig {
        AssignmentConfig {
            exam_type: self.exam_type,
            specialty: self.specialty,
            doctor: self.doctor.clone(),
            window: self.window,
            capacity: self.capacity,
            hold_count: self.hold_count,
            duration_minutes: self.duration_minutes,
            notes: self.notes.clone(),
        }
    }

    /// Replace the configurable field set, leaving the room snapshot alone.
    pub fn apply_config(&mut self, config: AssignmentConfig) {
        self.exam_type = config.exam_type;
        self.specialty = config.specialty;
        self.doctor = config.doctor;
        self.window = config.window;
        self.capacity = config.capacity;
        self.hold_count = config.hold_count;
        self.duration_minutes = config.duration_minutes;
        self.notes = config.notes;
    }
}

/// The configurable fields of an assignment: everything a swap preserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentConfig {
    #[serde(default)]
    pub exam_type: Option<ExamTypeId>,
    #[serde(default)]
    pub specialty: Option<SpecialtyId>,
    #[serde(default)]
    pub doctor: Option<DoctorCode>,
    #[serde(default)]
    pub window: Option<TimeWindow>,
    pub capacity: u32,
    pub hold_count: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SlotId;
    use crate::config::ShiftConfig;
    use crate::models::slot::WorkSession;
    use chrono::NaiveDate;

    fn sample_room(id: &str, name: &str, class: &str) -> Room {
        Room::new(id, name)
            .with_zone(1, "East Wing")
            .with_classification(class)
    }

    fn sample_slot() -> TimeSlot {
        TimeSlot::new(
            SlotId::new(1),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            WorkSession::Morning,
            &ShiftConfig::default(),
        )
    }

    #[test]
    fn test_from_room_snapshots_metadata() {
        let room = sample_room("r1", "Exam 1", "imaging");
        let a = RoomAssignment::from_room(AssignmentId::new(1), room.key().unwrap(), &room, 20);

        assert_eq!(a.room.as_str(), "r1");
        assert_eq!(a.room_name, "Exam 1");
        assert_eq!(a.classification.as_deref(), Some("imaging"));
        assert_eq!(a.capacity, 1);
        assert_eq!(a.hold_count, 0);
    }

    #[test]
    fn test_apply_room_preserves_configuration() {
        let old = sample_room("r1", "Exam 1", "imaging");
        let new = sample_room("r2", "Exam 2", "consult");

        let mut a = RoomAssignment::from_room(AssignmentId::new(1), old.key().unwrap(), &old, 20);
        a.exam_type = Some(ExamTypeId::new(4));
        a.doctor = DoctorCode::new("E001");
        a.capacity = 12;
        a.hold_count = 3;
        a.notes = "bring interpreter".to_string();

        a.apply_room(new.key().unwrap(), &new);

        assert_eq!(a.room.as_str(), "r2");
        assert_eq!(a.classification.as_deref(), Some("consult"));
        assert_eq!(a.exam_type, Some(ExamTypeId::new(4)));
        assert_eq!(a.doctor.as_ref().unwrap().as_str(), "E001");
        assert_eq!(a.capacity, 12);
        assert_eq!(a.hold_count, 3);
        assert_eq!(a.notes, "bring interpreter");
    }

    #[test]
    fn test_effective_window_falls_back_to_slot_default() {
        let room = sample_room("r1", "Exam 1", "imaging");
        let slot = sample_slot();
        let mut a = RoomAssignment::from_room(AssignmentId::new(1), room.key().unwrap(), &room, 20);

        assert_eq!(a.effective_window(&slot), slot.default_window);

        let custom = TimeWindow::parse("09:30", "11:00").unwrap();
        a.window = Some(custom);
        assert_eq!(a.effective_window(&slot), custom);
    }
}
