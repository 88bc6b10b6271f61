//! Application state for the HTTP server.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::db::catalog::{DoctorDirectory, RoomCatalog};
use crate::db::repository::FullRepository;
use crate::models::exam::Department;
use crate::models::grid::ScheduleGrid;

/// The mutable scheduling state shared by all handlers.
///
/// Held behind one `RwLock`: every grid mutation (including the swap's
/// check + apply + reindex sequence) runs under a single write guard, so
/// concurrent admins can never observe a half-applied swap.
pub struct ScheduleState {
    pub grid: ScheduleGrid,
    pub rooms: RoomCatalog,
    pub doctors: DoctorDirectory,
    /// Department reference data (exam types and their specialties).
    pub departments: Vec<Department>,
}

impl ScheduleState {
    pub fn new(grid: ScheduleGrid) -> Self {
        Self {
            grid,
            rooms: RoomCatalog::new(),
            doctors: DoctorDirectory::new(),
            departments: Vec::new(),
        }
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for directory fetch and persistence
    pub repository: Arc<dyn FullRepository>,
    /// Scheduling state (grid + caches)
    pub schedule: Arc<RwLock<ScheduleState>>,
}

impl AppState {
    /// Create a new application state with the given repository and grid.
    pub fn new(repository: Arc<dyn FullRepository>, grid: ScheduleGrid) -> Self {
        Self {
            repository,
            schedule: Arc::new(RwLock::new(ScheduleState::new(grid))),
        }
    }
}
