//! In-memory repository implementation for unit testing and local development.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use super::repository::{
    AssignmentRecord, DirectoryProvider, ScheduleQuery, ScheduleRepository,
};
use crate::api::RecordId;
use crate::models::doctor::Doctor;
use crate::models::room::{Room, RoomFilter};

/// In-memory backend implementing both collaborator traits.
///
/// Seed it with rooms and doctors for tests; flip [`set_directory_down`] to
/// exercise the "directory unavailable" paths.
///
/// [`set_directory_down`]: LocalRepository::set_directory_down
pub struct LocalRepository {
    rooms: RwLock<Vec<Room>>,
    doctors: RwLock<Vec<Doctor>>,
    records: RwLock<BTreeMap<RecordId, AssignmentRecord>>,
    next_record_id: AtomicI64,
    directory_down: AtomicBool,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(Vec::new()),
            doctors: RwLock::new(Vec::new()),
            records: RwLock::new(BTreeMap::new()),
            next_record_id: AtomicI64::new(1),
            directory_down: AtomicBool::new(false),
        }
    }

    pub fn with_rooms(self, rooms: Vec<Room>) -> Self {
        *self.rooms.write() = rooms;
        self
    }

    pub fn with_doctors(self, doctors: Vec<Doctor>) -> Self {
        *self.doctors.write() = doctors;
        self
    }

    /// Simulate a directory outage: subsequent fetches fail with a
    /// retryable fetch error.
    pub fn set_directory_down(&self, down: bool) {
        self.directory_down.store(down, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }

    fn check_directory(&self, operation: &str) -> RepositoryResult<()> {
        if self.directory_down.load(Ordering::SeqCst) {
            return Err(RepositoryError::fetch_with_context(
                "directory service unavailable",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryProvider for LocalRepository {
    async fn fetch_rooms(&self, filter: Option<&RoomFilter>) -> RepositoryResult<Vec<Room>> {
        self.check_directory("fetch_rooms")?;
        let rooms = self.rooms.read();
        Ok(match filter {
            Some(filter) => rooms.iter().filter(|r| filter.matches(r)).cloned().collect(),
            None => rooms.clone(),
        })
    }

    async fn fetch_doctors(&self) -> RepositoryResult<Vec<Doctor>> {
        self.check_directory("fetch_doctors")?;
        Ok(self.doctors.read().clone())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn create_assignments(
        &self,
        batch: Vec<AssignmentRecord>,
    ) -> RepositoryResult<Vec<RecordId>> {
        let mut records = self.records.write();
        let mut ids = Vec::with_capacity(batch.len());
        for mut record in batch {
            let id = RecordId::new(self.next_record_id.fetch_add(1, Ordering::SeqCst));
            record.id = Some(id);
            records.insert(id, record);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_assignment(
        &self,
        id: RecordId,
        mut record: AssignmentRecord,
    ) -> RepositoryResult<()> {
        let mut records = self.records.write();
        if !records.contains_key(&id) {
            return Err(RepositoryError::not_found_with_context(
                format!("assignment record {id}"),
                ErrorContext::new("update_assignment")
                    .with_entity("assignment")
                    .with_entity_id(id),
            ));
        }
        record.id = Some(id);
        records.insert(id, record);
        Ok(())
    }

    async fn delete_assignment(&self, id: RecordId) -> RepositoryResult<()> {
        if self.records.write().remove(&id).is_none() {
            return Err(RepositoryError::not_found_with_context(
                format!("assignment record {id}"),
                ErrorContext::new("delete_assignment")
                    .with_entity("assignment")
                    .with_entity_id(id),
            ));
        }
        Ok(())
    }

    async fn query_assignments(
        &self,
        query: &ScheduleQuery,
    ) -> RepositoryResult<Vec<AssignmentRecord>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.directory_down.load(Ordering::SeqCst))
    }
}
