//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The engine's own report types already derive Serialize/Deserialize and are
//! re-exported as-is.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Conflicts
    ConflictSite,
    DoctorConflict,
    // Validation
    ValidationIssue,
    ValidationReport,
};
pub use crate::models::assignment::{AssignmentConfig, RoomAssignment};
pub use crate::models::grid::CommandOutcome;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
}

/// Response for directory loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryLoadResponse {
    pub rooms: usize,
    pub doctors: usize,
}

/// A mutation command as posted by the frontend.
///
/// Rooms are referenced by their normalized id; `add_room` and the swap
/// replacement are resolved against the cached room catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandRequest {
    AddRoom {
        department: i64,
        slot: i64,
        room_id: String,
    },
    RemoveRoom {
        department: i64,
        slot: i64,
        room_id: String,
    },
    UpdateConfig {
        department: i64,
        slot: i64,
        room_id: String,
        config: AssignmentConfig,
    },
    SwapRoom {
        department: i64,
        slot: i64,
        current_room_id: String,
        replacement_room_id: String,
    },
}

/// Response for a dispatched command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub outcome: CommandOutcome,
}

/// Used-room ids for a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedRoomsResponse {
    pub slot: i64,
    pub room_ids: Vec<String>,
}

/// Used doctor codes for a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedDoctorsResponse {
    pub slot: i64,
    pub doctor_codes: Vec<String>,
}

/// Query parameters for the used-doctors endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsedDoctorsQuery {
    /// Assignment currently being edited, excluded from the result.
    #[serde(default)]
    pub excluding: Option<i64>,
}

/// Query parameters for the doctor-conflict endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DoctorConflictQuery {
    /// Department opening the picker.
    pub department: i64,
    /// Assignment currently being edited.
    #[serde(default)]
    pub excluding: Option<i64>,
}

/// One cell's assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellResponse {
    pub department: i64,
    pub slot: i64,
    pub pending: bool,
    pub assignments: Vec<RoomAssignment>,
}

/// Pending (unsaved) cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingResponse {
    pub cells: Vec<PendingCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCell {
    pub department: i64,
    pub slot: i64,
}

/// Request body for committing the week's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRequest {
    /// ISO week number
    pub week: u32,
    pub year: i32,
}

/// Response for a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResponse {
    /// Persisted record ids
    pub record_ids: Vec<i64>,
    /// SHA-256 checksum of the committed batch
    pub checksum: String,
}
