//! In-memory local repository implementation.
//!
//! All clinic data lives in one [`ClinicData`] behind a single mutex. Every
//! trait method locks once and runs its ledger operation to completion, so
//! concurrent requests are serialized and a capacity check can never be
//! separated from the insert that relies on it.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::db::repository::*;
use crate::ledger::{self, ClinicData};
use crate::models::{
    ClinicSchedule, NewPatient, Patient, PatientId, PatientUpdate, ReservationDetails,
    ReservationId, ScheduleFields, ScheduleId,
};

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
/// ```
/// use clinic_reservations::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// let shared = repo.clone();
/// assert_eq!(shared.reservation_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<Mutex<LocalData>>,
}

struct LocalData {
    clinic: ClinicData,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            clinic: ClinicData::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(LocalData::default())),
        }
    }

    /// Set the health status for testing failure handling.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.lock().is_healthy = healthy;
    }

    /// Clear all data from the repository. Id counters restart at 1.
    pub fn clear(&self) {
        let mut data = self.data.lock();
        data.clinic = ClinicData::new();
    }

    /// Get the number of reservations stored.
    pub fn reservation_count(&self) -> usize {
        self.data.lock().clinic.reservation_count()
    }

    /// Run `op` against the ledger under the lock, failing fast when the
    /// repository has been marked unhealthy.
    fn with_clinic<T>(
        &self,
        op: impl FnOnce(&mut ClinicData) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut data = self.data.lock();
        if !data.is_healthy {
            return Err(RepositoryError::internal("Repository is not healthy"));
        }
        op(&mut data.clinic)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientRepository for LocalRepository {
    async fn create_patient(&self, patient: NewPatient) -> RepositoryResult<Patient> {
        self.with_clinic(|clinic| ledger::create_patient(clinic, patient))
    }

    async fn list_patients(&self) -> RepositoryResult<Vec<Patient>> {
        self.with_clinic(|clinic| ledger::list_patients(clinic))
    }

    async fn get_patient(&self, patient_id: PatientId) -> RepositoryResult<Patient> {
        self.with_clinic(|clinic| ledger::get_patient(clinic, patient_id))
    }

    async fn update_patient(
        &self,
        patient_id: PatientId,
        update: PatientUpdate,
    ) -> RepositoryResult<Patient> {
        self.with_clinic(|clinic| ledger::update_patient(clinic, patient_id, update))
    }

    async fn delete_patient(&self, patient_id: PatientId) -> RepositoryResult<()> {
        self.with_clinic(|clinic| ledger::delete_patient(clinic, patient_id))
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.lock().is_healthy)
    }

    async fn create_schedule(&self, fields: ScheduleFields) -> RepositoryResult<ClinicSchedule> {
        self.with_clinic(|clinic| ledger::create_schedule(clinic, fields))
    }

    async fn list_schedules(&self) -> RepositoryResult<Vec<ClinicSchedule>> {
        self.with_clinic(|clinic| ledger::list_schedules(clinic))
    }

    async fn get_schedule(&self, schedule_id: ScheduleId) -> RepositoryResult<ClinicSchedule> {
        self.with_clinic(|clinic| ledger::get_schedule(clinic, schedule_id))
    }

    async fn update_schedule(
        &self,
        schedule_id: ScheduleId,
        fields: ScheduleFields,
    ) -> RepositoryResult<ClinicSchedule> {
        self.with_clinic(|clinic| ledger::update_schedule(clinic, schedule_id, fields))
    }

    async fn delete_schedule(&self, schedule_id: ScheduleId) -> RepositoryResult<()> {
        self.with_clinic(|clinic| ledger::delete_schedule(clinic, schedule_id))
    }
}

#[async_trait]
impl ReservationRepository for LocalRepository {
    async fn book(
        &self,
        patient_id: PatientId,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<ReservationDetails> {
        self.with_clinic(|clinic| {
            let reservation = ledger::book(clinic, patient_id, schedule_id)?;
            Ok(clinic.details(&reservation))
        })
    }

    async fn list_reservations_by_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<Vec<ReservationDetails>> {
        self.with_clinic(|clinic| {
            Ok(ledger::list_by_schedule(clinic, schedule_id)
                .iter()
                .map(|r| clinic.details(r))
                .collect())
        })
    }

    async fn list_reservations(&self) -> RepositoryResult<Vec<ReservationDetails>> {
        self.with_clinic(|clinic| {
            Ok(ledger::list_all(clinic)?
                .iter()
                .map(|r| clinic.details(r))
                .collect())
        })
    }

    async fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> RepositoryResult<ReservationDetails> {
        self.with_clinic(|clinic| {
            let reservation = ledger::get_reservation(clinic, reservation_id)?;
            Ok(clinic.details(&reservation))
        })
    }

    async fn reassign(
        &self,
        reservation_id: ReservationId,
        schedule_id: ScheduleId,
    ) -> RepositoryResult<ReservationDetails> {
        self.with_clinic(|clinic| {
            let reservation = ledger::reassign(clinic, reservation_id, schedule_id)?;
            Ok(clinic.details(&reservation))
        })
    }

    async fn cancel(&self, reservation_id: ReservationId) -> RepositoryResult<()> {
        self.with_clinic(|clinic| ledger::cancel(clinic, reservation_id))
    }
}
