//! Read-through caches over the directory fetch collaborators.
//!
//! The room catalog and doctor directory are fetched once at load and cached;
//! no mutation happens here. A failed fetch is a distinct, queryable state:
//! callers must be able to distinguish "empty result" from "fetch failed" and
//! disable dependent actions instead of crashing.

use log::warn;

use super::error::{RepositoryError, RepositoryResult};
use super::repository::DirectoryProvider;
use crate::models::doctor::Doctor;
use crate::models::room::{Room, RoomFilter};

/// Load state of a cached directory.
#[derive(Debug, Clone, Default)]
pub enum DirectoryState<T> {
    /// Fetch not attempted yet; dependent actions stay disabled.
    #[default]
    NotLoaded,
    Ready(T),
    /// Fetch failed; retryable, but never silently empty.
    Unavailable(String),
}

impl<T> DirectoryState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, DirectoryState::Ready(_))
    }
}

/// Cached room catalog.
#[derive(Debug, Default)]
pub struct RoomCatalog {
    state: DirectoryState<Vec<Room>>,
}

impl RoomCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and cache the catalog.
    pub async fn load(&mut self, provider: &dyn DirectoryProvider) -> RepositoryResult<()> {
        let fetched = provider.fetch_rooms(None).await;
        self.apply_fetch(fetched)
    }

    /// Install a fetch result into the cache.
    ///
    /// Rooms whose identity cannot be normalized are excluded from the
    /// candidate list with a warning; they must never collide with a real
    /// empty-string key. Split from [`load`](Self::load) so callers holding
    /// a lock can fetch first and install synchronously.
    pub fn apply_fetch(&mut self, fetched: RepositoryResult<Vec<Room>>) -> RepositoryResult<()> {
        match fetched {
            Ok(rooms) => {
                let mut usable = Vec::with_capacity(rooms.len());
                for room in rooms {
                    if room.key().is_none() {
                        warn!(
                            "room '{}' has no resolvable id; excluded from catalog",
                            room.name
                        );
                        continue;
                    }
                    usable.push(room);
                }
                self.state = DirectoryState::Ready(usable);
                Ok(())
            }
            Err(err) => {
                self.state = DirectoryState::Unavailable(err.to_string());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &DirectoryState<Vec<Room>> {
        &self.state
    }

    /// List cached rooms, optionally filtered.
    ///
    /// Errors when the catalog is not loaded or the fetch failed, so callers
    /// can disable the add-room action rather than treat the outage as an
    /// empty catalog.
    pub fn list_rooms(&self, filter: Option<&RoomFilter>) -> RepositoryResult<Vec<Room>> {
        match &self.state {
            DirectoryState::Ready(rooms) => Ok(match filter {
                Some(filter) => rooms.iter().filter(|r| filter.matches(r)).cloned().collect(),
                None => rooms.clone(),
            }),
            DirectoryState::NotLoaded => {
                Err(RepositoryError::fetch("room catalog not loaded yet"))
            }
            DirectoryState::Unavailable(reason) => Err(RepositoryError::fetch(format!(
                "room catalog unavailable: {reason}"
            ))),
        }
    }

    /// Look up one cached room by its normalized id.
    pub fn room(&self, key: &crate::api::RoomKey) -> Option<&Room> {
        match &self.state {
            DirectoryState::Ready(rooms) => {
                rooms.iter().find(|r| r.key().as_ref() == Some(key))
            }
            _ => None,
        }
    }
}

/// Cached doctor directory.
#[derive(Debug, Default)]
pub struct DoctorDirectory {
    state: DirectoryState<Vec<Doctor>>,
}

impl DoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and cache the directory.
    pub async fn load(&mut self, provider: &dyn DirectoryProvider) -> RepositoryResult<()> {
        let fetched = provider.fetch_doctors().await;
        self.apply_fetch(fetched)
    }

    /// Install a fetch result into the cache.
    pub fn apply_fetch(&mut self, fetched: RepositoryResult<Vec<Doctor>>) -> RepositoryResult<()> {
        match fetched {
            Ok(doctors) => {
                self.state = DirectoryState::Ready(doctors);
                Ok(())
            }
            Err(err) => {
                self.state = DirectoryState::Unavailable(err.to_string());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &DirectoryState<Vec<Doctor>> {
        &self.state
    }

    /// List cached doctors; errors while not loaded or unavailable.
    pub fn list_doctors(&self) -> RepositoryResult<Vec<Doctor>> {
        match &self.state {
            DirectoryState::Ready(doctors) => Ok(doctors.clone()),
            DirectoryState::NotLoaded => {
                Err(RepositoryError::fetch("doctor directory not loaded yet"))
            }
            DirectoryState::Unavailable(reason) => Err(RepositoryError::fetch(format!(
                "doctor directory unavailable: {reason}"
            ))),
        }
    }
}
