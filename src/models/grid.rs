//! The slot grid model: the (department × slot) matrix of schedule cells.
//!
//! `ScheduleGrid` exclusively owns all cells and their assignments. Cells are
//! the single source of truth; the per-slot used-room index is a derived view
//! rebuilt on every mutation of the affected slot, so a swap can never leave
//! the grid with zero or two cells claiming the same room.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::api::{AssignmentId, DepartmentId, DoctorCode, RoomKey, SlotId};
use crate::models::assignment::{AssignmentConfig, RoomAssignment};
use crate::models::room::{normalize_room_id, Room};
use crate::models::slot::TimeSlot;

/// The intersection of one department and one slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub department: DepartmentId,
    pub slot: SlotId,
}

impl CellKey {
    pub fn new(department: DepartmentId, slot: SlotId) -> Self {
        Self { department, slot }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dept {} / slot {}", self.department, self.slot)
    }
}

/// Errors raised by grid mutations. All are recoverable: a failed mutation
/// leaves the grid untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    #[error("slot {0} is not part of this grid")]
    UnknownSlot(SlotId),

    #[error("no assignment for room {room} in {cell}")]
    UnknownAssignment { cell: CellKey, room: RoomKey },

    #[error("room {room} is already assigned in this slot by {occupied_by}")]
    DuplicateRoom { room: RoomKey, occupied_by: CellKey },

    #[error("room '{name}' has no resolvable identity and cannot be assigned")]
    UnresolvableRoomId { name: String },

    #[error("doctor {code} is already booked in this slot by {occupied_by}")]
    DoctorDoubleBooked {
        code: DoctorCode,
        occupied_by: CellKey,
    },
}

/// Mutation commands accepted by [`ScheduleGrid::apply`].
///
/// The embedding UI talks to the grid exclusively through these; there are no
/// other mutation entry points.
#[derive(Debug, Clone)]
pub enum GridCommand {
    AddRoom {
        department: DepartmentId,
        slot: SlotId,
        room: Room,
    },
    RemoveRoom {
        department: DepartmentId,
        slot: SlotId,
        room: RoomKey,
    },
    UpdateConfig {
        department: DepartmentId,
        slot: SlotId,
        room: RoomKey,
        config: AssignmentConfig,
    },
    SwapRoom {
        department: DepartmentId,
        slot: SlotId,
        current: RoomKey,
        replacement: Room,
    },
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Added(AssignmentId),
    Removed(AssignmentId),
    Updated,
    Swapped { previous: RoomKey },
    /// Swapping a room to its own current id changes nothing.
    NoOp,
}

/// The full weekly schedule grid.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    slots: BTreeMap<SlotId, TimeSlot>,
    cells: BTreeMap<CellKey, Vec<RoomAssignment>>,
    /// Derived per-slot used-room index; rebuilt from `cells` on mutation.
    used_rooms: BTreeMap<SlotId, BTreeSet<RoomKey>>,
    /// Cells with uncommitted edits.
    pending: BTreeSet<CellKey>,
    next_assignment_id: i64,
    default_duration_minutes: u32,
}

impl ScheduleGrid {
    /// Create a grid over the given enabled slots.
    pub fn new(slots: Vec<TimeSlot>, default_duration_minutes: u32) -> Self {
        let slots = slots.into_iter().map(|s| (s.id, s)).collect();
        Self {
            slots,
            cells: BTreeMap::new(),
            used_rooms: BTreeMap::new(),
            pending: BTreeSet::new(),
            next_assignment_id: 1,
            default_duration_minutes,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn slot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.slots.get(&id)
    }

    pub fn slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.values()
    }

    /// Assignments of one cell, in insertion order. Empty for untouched cells.
    pub fn cell(&self, key: CellKey) -> &[RoomAssignment] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate every (cell, assignment) pair in the grid.
    pub fn assignments(&self) -> impl Iterator<Item = (CellKey, &RoomAssignment)> {
        self.cells
            .iter()
            .flat_map(|(key, list)| list.iter().map(move |a| (*key, a)))
    }

    pub fn assignment(&self, key: CellKey, room: &RoomKey) -> Option<&RoomAssignment> {
        self.cell(key).iter().find(|a| &a.room == room)
    }

    /// Normalized ids of every room assigned anywhere in the slot, across all
    /// departments.
    pub fn used_room_ids(&self, slot: SlotId) -> BTreeSet<RoomKey> {
        self.used_rooms.get(&slot).cloned().unwrap_or_default()
    }

    /// Doctor codes committed anywhere in the slot, across all departments,
    /// optionally excluding the assignment currently being edited.
    pub fn used_doctor_codes(
        &self,
        slot: SlotId,
        excluding: Option<AssignmentId>,
    ) -> BTreeSet<DoctorCode> {
        self.slot_assignments(slot)
            .filter(|(_, a)| excluding != Some(a.id))
            .filter_map(|(_, a)| a.doctor.clone())
            .collect()
    }

    /// The cell occupying a room in the given slot, if any.
    pub fn occupying_cell(&self, slot: SlotId, room: &RoomKey) -> Option<CellKey> {
        self.slot_assignments(slot)
            .find(|(_, a)| &a.room == room)
            .map(|(key, _)| key)
    }

    /// Every (cell, assignment) pair in one slot, across departments.
    pub fn slot_assignments(
        &self,
        slot: SlotId,
    ) -> impl Iterator<Item = (CellKey, &RoomAssignment)> {
        self.assignments().filter(move |(key, _)| key.slot == slot)
    }

    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    // ------------------------------------------------------------------
    // Pending-change tracking
    // ------------------------------------------------------------------

    pub fn is_pending(&self, key: CellKey) -> bool {
        self.pending.contains(&key)
    }

    pub fn pending_cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.pending.iter().copied()
    }

    /// Clear a cell's dirty marker after the external save succeeded or the
    /// editor discarded its edits.
    pub fn clear_pending(&mut self, key: CellKey) {
        self.pending.remove(&key);
    }

    pub fn clear_all_pending(&mut self) {
        self.pending.clear();
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Dispatch a mutation command.
    pub fn apply(&mut self, command: GridCommand) -> Result<CommandOutcome, GridError> {
        match command {
            GridCommand::AddRoom {
                department,
                slot,
                room,
            } => self
                .add_room(department, slot, &room)
                .map(CommandOutcome::Added),
            GridCommand::RemoveRoom {
                department,
                slot,
                room,
            } => self
                .remove_room(department, slot, &room)
                .map(|a| CommandOutcome::Removed(a.id)),
            GridCommand::UpdateConfig {
                department,
                slot,
                room,
                config,
            } => self
                .update_config(department, slot, &room, config)
                .map(|_| CommandOutcome::Updated),
            GridCommand::SwapRoom {
                department,
                slot,
                current,
                replacement,
            } => self.swap_room(department, slot, &current, &replacement),
        }
    }

    /// Add a room to a cell. Rejects rooms already used anywhere in the slot
    /// and rooms without a resolvable identity.
    pub fn add_room(
        &mut self,
        department: DepartmentId,
        slot: SlotId,
        room: &Room,
    ) -> Result<AssignmentId, GridError> {
        if !self.slots.contains_key(&slot) {
            return Err(GridError::UnknownSlot(slot));
        }
        let key = normalize_room_id(room).ok_or_else(|| {
            log::warn!("room '{}' has no resolvable id; skipping add", room.name);
            GridError::UnresolvableRoomId {
                name: room.name.clone(),
            }
        })?;
        if let Some(occupied_by) = self.occupying_cell(slot, &key) {
            return Err(GridError::DuplicateRoom {
                room: key,
                occupied_by,
            });
        }

        let id = AssignmentId::new(self.next_assignment_id);
        self.next_assignment_id += 1;

        let assignment = RoomAssignment::from_room(id, key, room, self.default_duration_minutes);
        let cell = CellKey::new(department, slot);
        self.cells.entry(cell).or_default().push(assignment);
        self.rebuild_slot_index(slot);
        self.pending.insert(cell);
        Ok(id)
    }

    /// Remove a room from a cell, returning the removed assignment.
    pub fn remove_room(
        &mut self,
        department: DepartmentId,
        slot: SlotId,
        room: &RoomKey,
    ) -> Result<RoomAssignment, GridError> {
        let cell = CellKey::new(department, slot);
        let list = self
            .cells
            .get_mut(&cell)
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: room.clone(),
            })?;
        let index = list
            .iter()
            .position(|a| &a.room == room)
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: room.clone(),
            })?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.cells.remove(&cell);
        }
        self.rebuild_slot_index(slot);
        self.pending.insert(cell);
        Ok(removed)
    }

    /// Replace an assignment's configuration.
    ///
    /// The grid does not validate editor-level rules here (that is the commit
    /// gate's job) but it does enforce the doctor-uniqueness invariant as a
    /// backstop: the editor is expected to have rejected the selection
    /// already.
    pub fn update_config(
        &mut self,
        department: DepartmentId,
        slot: SlotId,
        room: &RoomKey,
        config: AssignmentConfig,
    ) -> Result<(), GridError> {
        let cell = CellKey::new(department, slot);
        let id = self
            .assignment(cell, room)
            .map(|a| a.id)
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: room.clone(),
            })?;

        if let Some(code) = &config.doctor {
            if let Some((occupied_by, _)) = self
                .slot_assignments(slot)
                .find(|(_, a)| a.id != id && a.doctor.as_ref() == Some(code))
            {
                log::warn!(
                    "rejected config for {cell}: doctor {code} already booked by {occupied_by}"
                );
                return Err(GridError::DoctorDoubleBooked {
                    code: code.clone(),
                    occupied_by,
                });
            }
        }

        // Lookup again mutably; the immutable borrow above is released.
        let assignment = self
            .cells
            .get_mut(&cell)
            .and_then(|list| list.iter_mut().find(|a| &a.room == room))
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: room.clone(),
            })?;
        assignment.apply_config(config);
        self.pending.insert(cell);
        Ok(())
    }

    /// Replace the room bound to an assignment while preserving its
    /// configuration.
    ///
    /// Order of operations: no-op check, duplicate check, metadata apply,
    /// index rebuild. The duplicate check and the index update happen inside
    /// one `&mut self` critical section, so readers of [`used_room_ids`]
    /// never observe a state where the old and new id are both present or
    /// both absent.
    ///
    /// [`used_room_ids`]: ScheduleGrid::used_room_ids
    pub fn swap_room(
        &mut self,
        department: DepartmentId,
        slot: SlotId,
        current: &RoomKey,
        replacement: &Room,
    ) -> Result<CommandOutcome, GridError> {
        let cell = CellKey::new(department, slot);
        if self.assignment(cell, current).is_none() {
            return Err(GridError::UnknownAssignment {
                cell,
                room: current.clone(),
            });
        }

        let new_key = normalize_room_id(replacement).ok_or_else(|| {
            log::warn!(
                "room '{}' has no resolvable id; rejecting swap",
                replacement.name
            );
            GridError::UnresolvableRoomId {
                name: replacement.name.clone(),
            }
        })?;

        if new_key == *current {
            return Ok(CommandOutcome::NoOp);
        }

        if let Some(occupied_by) = self.occupying_cell(slot, &new_key) {
            return Err(GridError::DuplicateRoom {
                room: new_key,
                occupied_by,
            });
        }

        let assignment = self
            .cells
            .get_mut(&cell)
            .and_then(|list| list.iter_mut().find(|a| &a.room == current))
            .ok_or_else(|| GridError::UnknownAssignment {
                cell,
                room: current.clone(),
            })?;
        let previous = assignment.room.clone();
        assignment.apply_room(new_key, replacement);
        self.rebuild_slot_index(slot);
        self.pending.insert(cell);
        Ok(CommandOutcome::Swapped { previous })
    }

    /// Rebuild the derived used-room set for one slot from the owning cells.
    fn rebuild_slot_index(&mut self, slot: SlotId) {
        let set: BTreeSet<RoomKey> = self
            .cells
            .iter()
            .filter(|(key, _)| key.slot == slot)
            .flat_map(|(_, list)| list.iter().map(|a| a.room.clone()))
            .collect();
        if set.is_empty() {
            self.used_rooms.remove(&slot);
        } else {
            self.used_rooms.insert(slot, set);
        }
    }
}
