//! Repository layer for directory data and schedule persistence.
//!
//! This module provides abstractions over the engine's two external
//! collaborators via the Repository pattern, allowing different backends to
//! be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, embedding UI)             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Caches (catalog.rs) - Room Catalog / Doctor Directory  │
//! │  - Fetch-once read-through caching                       │
//! │  - Distinct "unavailable" state                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs) - Abstract Interface │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `repository`: Trait definitions for directory fetch and persistence
//! - `catalog`: Read-through caches with explicit load states
//! - `local`: In-memory implementation for unit testing and local development
//! - `checksum`: Commit-batch checksums for deduplication
//! - `factory`: Factory for creating repository instances

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod catalog;
pub mod checksum;
pub mod error;
pub mod factory;
pub mod local;
pub mod repository;

pub use catalog::{DirectoryState, DoctorDirectory, RoomCatalog};
pub use checksum::{batch_checksum, calculate_checksum};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use factory::{RepositoryFactory, RepositoryType};
pub use local::LocalRepository;
pub use repository::{
    collect_batch, AssignmentRecord, DirectoryProvider, FullRepository, ScheduleQuery,
    ScheduleRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env();
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
