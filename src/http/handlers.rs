//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the grid,
//! the conflict/validation services, and the repository layer for business
//! logic. All grid mutations run under the schedule write lock, so the swap
//! sequence is atomic with respect to concurrent readers.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CellResponse, CommandRequest, CommandResponse, CommitRequest, CommitResponse,
    DirectoryLoadResponse, DoctorConflictQuery, HealthResponse, PendingCell, PendingResponse,
    UsedDoctorsQuery, UsedDoctorsResponse, UsedRoomsResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AssignmentId, DepartmentId, DoctorCode, RoomKey, SlotId, ValidationReport};
use crate::db::checksum::batch_checksum;
use crate::db::error::RepositoryError;
use crate::db::repository::collect_batch;
use crate::models::doctor::Doctor;
use crate::models::exam::Department;
use crate::models::grid::{CellKey, GridCommand};
use crate::models::room::{Room, RoomFilter};
use crate::services::conflicts::doctor_conflict;
use crate::services::validation::validate_assignment;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn room_key(raw: &str) -> Result<RoomKey, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("room id must not be empty".to_string()));
    }
    Ok(RoomKey::new(trimmed.to_string()))
}

fn doctor_code(raw: &str) -> Result<DoctorCode, AppError> {
    DoctorCode::new(raw)
        .ok_or_else(|| AppError::BadRequest("doctor code must not be empty".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Directories
// =============================================================================

/// POST /v1/directories/load
///
/// Fetch the room catalog and doctor directory once and cache them. A failed
/// fetch leaves the affected directory in the "unavailable" state and answers
/// 503; dependent endpoints stay disabled until a retry succeeds.
pub async fn load_directories(
    State(state): State<AppState>,
) -> HandlerResult<DirectoryLoadResponse> {
    // Fetch outside the lock; install synchronously under it.
    let rooms = state.repository.fetch_rooms(None).await;
    let doctors = state.repository.fetch_doctors().await;

    let mut schedule = state.schedule.write();
    let rooms_result = schedule.rooms.apply_fetch(rooms);
    let doctors_result = schedule.doctors.apply_fetch(doctors);
    rooms_result?;
    doctors_result?;

    Ok(Json(DirectoryLoadResponse {
        rooms: schedule.rooms.list_rooms(None)?.len(),
        doctors: schedule.doctors.list_doctors()?.len(),
    }))
}

/// GET /v1/rooms
///
/// List cached rooms, optionally filtered by zone or owning department.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(filter): Query<RoomFilter>,
) -> HandlerResult<Vec<Room>> {
    let schedule = state.schedule.read();
    Ok(Json(schedule.rooms.list_rooms(Some(&filter))?))
}

/// GET /v1/doctors
///
/// List cached doctors.
pub async fn list_doctors(State(state): State<AppState>) -> HandlerResult<Vec<Doctor>> {
    let schedule = state.schedule.read();
    Ok(Json(schedule.doctors.list_doctors()?))
}

/// PUT /v1/departments
///
/// Install department reference data (exam types and specialties).
pub async fn set_departments(
    State(state): State<AppState>,
    Json(departments): Json<Vec<Department>>,
) -> HandlerResult<usize> {
    let mut schedule = state.schedule.write();
    schedule.departments = departments;
    Ok(Json(schedule.departments.len()))
}

// =============================================================================
// Slot queries
// =============================================================================

/// GET /v1/slots/{slot_id}/used-rooms
///
/// Normalized ids of every room assigned in the slot, across all
/// departments. The frontend renders these as disabled candidates.
pub async fn get_used_rooms(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
) -> HandlerResult<UsedRoomsResponse> {
    let schedule = state.schedule.read();
    let slot = SlotId::new(slot_id);
    if schedule.grid.slot(slot).is_none() {
        return Err(AppError::NotFound(format!("slot {slot_id}")));
    }
    let room_ids = schedule
        .grid
        .used_room_ids(slot)
        .into_iter()
        .map(|k| k.as_str().to_string())
        .collect();
    Ok(Json(UsedRoomsResponse {
        slot: slot_id,
        room_ids,
    }))
}

/// GET /v1/slots/{slot_id}/used-doctors
///
/// Doctor codes booked in the slot, optionally excluding the assignment
/// currently being edited.
pub async fn get_used_doctors(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
    Query(query): Query<UsedDoctorsQuery>,
) -> HandlerResult<UsedDoctorsResponse> {
    let schedule = state.schedule.read();
    let slot = SlotId::new(slot_id);
    if schedule.grid.slot(slot).is_none() {
        return Err(AppError::NotFound(format!("slot {slot_id}")));
    }
    let doctor_codes = schedule
        .grid
        .used_doctor_codes(slot, query.excluding.map(AssignmentId::new))
        .into_iter()
        .map(|c| c.as_str().to_string())
        .collect();
    Ok(Json(UsedDoctorsResponse {
        slot: slot_id,
        doctor_codes,
    }))
}

/// GET /v1/slots/{slot_id}/doctors/{code}/conflict
///
/// Conflict detail for a doctor in a slot, for rendering the picker entry as
/// disabled with the conflicting booking named.
pub async fn get_doctor_conflict(
    State(state): State<AppState>,
    Path((slot_id, code)): Path<(i64, String)>,
    Query(query): Query<DoctorConflictQuery>,
) -> HandlerResult<crate::api::DoctorConflict> {
    let schedule = state.schedule.read();
    let code = doctor_code(&code)?;
    let conflict = doctor_conflict(
        &schedule.grid,
        &code,
        SlotId::new(slot_id),
        DepartmentId::new(query.department),
        query.excluding.map(AssignmentId::new),
    );
    Ok(Json(conflict))
}

// =============================================================================
// Grid cells and mutations
// =============================================================================

/// GET /v1/cells/{department_id}/{slot_id}
///
/// One cell's assignments plus its unsaved-changes marker.
pub async fn get_cell(
    State(state): State<AppState>,
    Path((department_id, slot_id)): Path<(i64, i64)>,
) -> HandlerResult<CellResponse> {
    let schedule = state.schedule.read();
    let cell = CellKey::new(DepartmentId::new(department_id), SlotId::new(slot_id));
    Ok(Json(CellResponse {
        department: department_id,
        slot: slot_id,
        pending: schedule.grid.is_pending(cell),
        assignments: schedule.grid.cell(cell).to_vec(),
    }))
}

/// GET /v1/cells/{department_id}/{slot_id}/{room_id}/validation
///
/// Validation report for one assignment: every violated commit rule as its
/// own human-readable message.
pub async fn get_cell_validation(
    State(state): State<AppState>,
    Path((department_id, slot_id, room_id)): Path<(i64, i64, String)>,
) -> HandlerResult<ValidationReport> {
    let schedule = state.schedule.read();
    let department_id = DepartmentId::new(department_id);
    let cell = CellKey::new(department_id, SlotId::new(slot_id));
    let room = room_key(&room_id)?;

    let assignment = schedule
        .grid
        .assignment(cell, &room)
        .ok_or_else(|| AppError::NotFound(format!("assignment for room {room} in {cell}")))?;
    let slot = schedule
        .grid
        .slot(cell.slot)
        .ok_or_else(|| AppError::NotFound(format!("slot {slot_id}")))?;
    let department = schedule
        .departments
        .iter()
        .find(|d| d.id == department_id)
        .cloned()
        .unwrap_or_else(|| Department::new(department_id, ""));

    let issues = validate_assignment(assignment, slot, &department);
    Ok(Json(ValidationReport { cell, issues }))
}

/// GET /v1/grid/pending
///
/// Cells with uncommitted edits, for "unsaved changes" indicators.
pub async fn get_pending(State(state): State<AppState>) -> HandlerResult<PendingResponse> {
    let schedule = state.schedule.read();
    let cells = schedule
        .grid
        .pending_cells()
        .map(|c| PendingCell {
            department: c.department.value(),
            slot: c.slot.value(),
        })
        .collect();
    Ok(Json(PendingResponse { cells }))
}

/// POST /v1/grid/commands
///
/// Dispatch one mutation command. Duplicate-room and double-booked-doctor
/// rejections answer 409 and leave the grid unchanged.
pub async fn dispatch_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> HandlerResult<CommandResponse> {
    let mut schedule = state.schedule.write();

    let command = match request {
        CommandRequest::AddRoom {
            department,
            slot,
            room_id,
        } => {
            let room = lookup_room(&schedule, &room_id)?;
            GridCommand::AddRoom {
                department: DepartmentId::new(department),
                slot: SlotId::new(slot),
                room,
            }
        }
        CommandRequest::RemoveRoom {
            department,
            slot,
            room_id,
        } => GridCommand::RemoveRoom {
            department: DepartmentId::new(department),
            slot: SlotId::new(slot),
            room: room_key(&room_id)?,
        },
        CommandRequest::UpdateConfig {
            department,
            slot,
            room_id,
            config,
        } => GridCommand::UpdateConfig {
            department: DepartmentId::new(department),
            slot: SlotId::new(slot),
            room: room_key(&room_id)?,
            config,
        },
        CommandRequest::SwapRoom {
            department,
            slot,
            current_room_id,
            replacement_room_id,
        } => {
            let replacement = lookup_room(&schedule, &replacement_room_id)?;
            GridCommand::SwapRoom {
                department: DepartmentId::new(department),
                slot: SlotId::new(slot),
                current: room_key(&current_room_id)?,
                replacement,
            }
        }
    };

    let outcome = schedule.grid.apply(command)?;
    Ok(Json(CommandResponse { outcome }))
}

fn lookup_room(
    schedule: &super::state::ScheduleState,
    room_id: &str,
) -> Result<Room, AppError> {
    let key = room_key(room_id)?;
    // An unavailable catalog disables room selection entirely.
    if !schedule.rooms.state().is_ready() {
        return Err(AppError::Repository(RepositoryError::fetch(
            "room catalog unavailable",
        )));
    }
    schedule
        .rooms
        .room(&key)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("room {key} not in catalog")))
}

// =============================================================================
// Commit
// =============================================================================

/// POST /v1/commit
///
/// Flatten the grid into assignment records for the given week, persist the
/// batch, and clear the unsaved-changes markers.
pub async fn commit_schedule(
    State(state): State<AppState>,
    Json(request): Json<CommitRequest>,
) -> HandlerResult<CommitResponse> {
    let (batch, checksum) = {
        let schedule = state.schedule.read();
        let batch = collect_batch(&schedule.grid, request.week, request.year);
        let checksum = batch_checksum(&batch);
        (batch, checksum)
    };

    let record_ids = state.repository.create_assignments(batch).await?;

    // The external save succeeded; dirty markers are cleared only now.
    state.schedule.write().grid.clear_all_pending();

    Ok(Json(CommitResponse {
        record_ids: record_ids.into_iter().map(|id| id.value()).collect(),
        checksum,
    }))
}
