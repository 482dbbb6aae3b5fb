//! Reservation ledger repository trait.
//!
//! Results are returned as [`ReservationDetails`], resolved under the same
//! exclusive access as the operation that produced them.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{PatientId, ReservationDetails, ReservationId, ScheduleId};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Book a patient onto the back of a schedule's queue.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - Unknown patient or schedule
    /// * `Err(RepositoryError::Conflict)` - The patient already holds this schedule
    /// * `Err(RepositoryError::CapacityExceeded)` - The schedule is full
    async fn book(
        &self,
        patient_id: PatientId,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<ReservationDetails>;

    /// Reservations on one schedule in queue order. Never `NotFound`.
    async fn list_reservations_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<Vec<ReservationDetails>>;

    /// All reservations by id; `NotFound` when there are none.
    async fn list_reservations(&self) -> RepositoryResult<Vec<ReservationDetails>>;

    async fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> RepositoryResult<ReservationDetails>;

    /// Move a reservation to the back of another schedule's queue.
    async fn reassign(
        &self,
        reservation_id: ReservationId,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<ReservationDetails>;

    /// Cancel a reservation, closing the gap it leaves in its queue.
    async fn cancel(&self, reservation_id: ReservationId) -> RepositoryResult<()>;
}
