//! Repository trait definitions for clinic storage.
//!
//! Storage is split across three focused traits, one per record collection:
//!
//! - [`PatientRepository`]: patient registration and edits
//! - [`ScheduleRepository`]: clinic schedule slots, plus the health probe
//! - [`ReservationRepository`]: the reservation ledger (book, reassign, cancel)
//!
//! Implementations must run each method as one indivisible step with respect
//! to every other method, since the ledger's capacity and duplicate checks
//! read state that the following write depends on.
//!
//! # Convenience Trait Bound
//!
//! ```ignore
//! async fn book_first_slot<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let schedule = repo.list_schedules().await?.remove(0);
//!     repo.book(PatientId::new(1), schedule.id).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod patient;
pub mod reservation;
pub mod schedule;

// Re-export error types
pub use error::{ErrorContext, ErrorKind, RepositoryError, RepositoryResult};

// Re-export all traits
pub use patient::PatientRepository;
pub use reservation::ReservationRepository;
pub use schedule::ScheduleRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: PatientRepository + ScheduleRepository + ReservationRepository {}

// Blanket implementation: any type implementing all three traits automatically implements FullRepository
impl<T> FullRepository for T where T: PatientRepository + ScheduleRepository + ReservationRepository
{}
