//! Storage for patients, schedules and reservations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  LocalRepository (repositories/local.rs)                │
//! │  - one mutex around the ledger's ClinicData             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Ledger (crate::ledger) - queue and record rules        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted; all data is lost when the process exits.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable the `local-repo` feature: it is the only storage backend.");

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, ErrorKind, FullRepository, PatientRepository, RepositoryError,
    RepositoryResult, ReservationRepository, ScheduleRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton.
pub fn init_repository() -> Result<()> {
    REPOSITORY.get_or_init(|| Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
