//! Clinic schedule repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ClinicSchedule, ScheduleFields, ScheduleId};

/// Repository trait for clinic schedule slots.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // ==================== Health ====================

    /// Check if the store is able to serve requests.
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Schedule Operations ====================

    /// Create a schedule slot.
    ///
    /// # Returns
    /// * `Ok(ClinicSchedule)` - The stored schedule with its assigned id
    /// * `Err(RepositoryError::Conflict)` - If another schedule has the same date and time
    /// * `Err(RepositoryError::ValidationError)` - If `max_slot` is zero
    async fn create_schedule(&self, fields: ScheduleFields) -> RepositoryResult<ClinicSchedule>;

    /// All schedules by id; `NotFound` when there are none.
    async fn list_schedules(&self) -> RepositoryResult<Vec<ClinicSchedule>>;

    async fn get_schedule(&self, schedule_id: ScheduleId) -> RepositoryResult<ClinicSchedule>;

    /// Replace all fields of a schedule.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the schedule doesn't exist
    /// * `Err(RepositoryError::Conflict)` - If the new slot belongs to another schedule
    /// * `Err(RepositoryError::CapacityExceeded)` - If `max_slot` is below the current queue length
    async fn update_schedule(
        &self,
        schedule_id: ScheduleId,
        fields: ScheduleFields,
    ) -> RepositoryResult<ClinicSchedule>;

    async fn delete_schedule(&self, schedule_id: ScheduleId) -> RepositoryResult<()>;
}
