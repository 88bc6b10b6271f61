//! Room catalog model and canonical room identity.

use crate::api::{DepartmentId, RoomKey};
use serde::{Deserialize, Serialize};

/// A physical clinic room, as returned by the room fetch collaborator.
///
/// Immutable reference data once loaded. Older payloads carry the key under
/// `room_id` instead of `id`, and some rooms only have a display `code`;
/// identity is always resolved through [`normalize_room_id`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Server-assigned identifier (preferred identity).
    #[serde(default)]
    pub id: Option<String>,
    /// Stable human-facing room code (e.g. "A-203").
    #[serde(default)]
    pub code: Option<String>,
    /// Legacy identifier alias seen in older catalog payloads.
    #[serde(default)]
    pub room_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Zone identifier.
    #[serde(default)]
    pub zone_id: Option<i64>,
    /// Zone display name.
    #[serde(default)]
    pub zone_name: Option<String>,
    /// Classification tag; drives color coding and exam-type affinity.
    #[serde(default)]
    pub classification: Option<String>,
    /// Owning department, when the room is bound to one.
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            code: None,
            room_id: None,
            name: name.into(),
            zone_id: None,
            zone_name: None,
            classification: None,
            department: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_zone(mut self, zone_id: i64, zone_name: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id);
        self.zone_name = Some(zone_name.into());
        self
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn with_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }

    /// Canonical identity of this room, if resolvable.
    pub fn key(&self) -> Option<RoomKey> {
        normalize_room_id(self)
    }
}

/// Resolve a room's canonical identity key.
///
/// Fallback precedence is fixed: `id`, then `code`, then `room_id`.
/// Whitespace-only candidates fall through to the next one. Returns `None`
/// when no candidate resolves; such a room is unassignable and must be
/// excluded from candidate lists rather than keyed by an empty string.
pub fn normalize_room_id(room: &Room) -> Option<RoomKey> {
    [&room.id, &room.code, &room.room_id]
        .into_iter()
        .flatten()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(|v| RoomKey::new(v.to_string()))
}

/// Filter for room catalog listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    /// Restrict to a zone.
    #[serde(default)]
    pub zone_id: Option<i64>,
    /// Restrict to rooms owned by a department (unbound rooms always match).
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

impl RoomFilter {
    pub fn matches(&self, room: &Room) -> bool {
        if let Some(zone_id) = self.zone_id {
            if room.zone_id != Some(zone_id) {
                return false;
            }
        }
        if let Some(department) = self.department {
            if let Some(owner) = room.department {
                if owner != department {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefers_id() {
        let room = Room {
            id: Some("srv-9".to_string()),
            code: Some("A-101".to_string()),
            room_id: Some("legacy-9".to_string()),
            ..Room::new("x", "ignored")
        };
        assert_eq!(normalize_room_id(&room).unwrap().as_str(), "srv-9");
    }

    #[test]
    fn test_normalize_falls_back_to_code_then_legacy() {
        let mut room = Room::new("", "Exam 1").with_code("A-101");
        room.id = None;
        assert_eq!(normalize_room_id(&room).unwrap().as_str(), "A-101");

        room.code = None;
        room.room_id = Some("legacy-1".to_string());
        assert_eq!(normalize_room_id(&room).unwrap().as_str(), "legacy-1");
    }

    #[test]
    fn test_whitespace_candidate_falls_through() {
        let room = Room {
            id: Some("   ".to_string()),
            code: Some("B-7".to_string()),
            room_id: None,
            ..Room::new("x", "ignored")
        };
        assert_eq!(normalize_room_id(&room).unwrap().as_str(), "B-7");
    }

    #[test]
    fn test_unresolvable_room_has_no_key() {
        let room = Room {
            id: None,
            code: Some("  ".to_string()),
            room_id: None,
            ..Room::new("x", "Broken")
        };
        assert!(normalize_room_id(&room).is_none());
    }

    #[test]
    fn test_filter_by_zone_and_department() {
        let dept = DepartmentId::new(3);
        let room = Room::new("r1", "Exam 1")
            .with_zone(2, "East Wing")
            .with_department(dept);

        let filter = RoomFilter {
            zone_id: Some(2),
            department: Some(dept),
        };
        assert!(filter.matches(&room));

        let other_zone = RoomFilter {
            zone_id: Some(9),
            ..Default::default()
        };
        assert!(!other_zone.matches(&room));
    }

    #[test]
    fn test_unbound_room_matches_any_department() {
        let room = Room::new("r1", "Exam 1");
        let filter = RoomFilter {
            department: Some(DepartmentId::new(5)),
            ..Default::default()
        };
        assert!(filter.matches(&room));
    }
}
