//! Patient repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewPatient, Patient, PatientId, PatientUpdate};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Register a patient.
    ///
    /// # Returns
    /// * `Ok(Patient)` - The stored patient with its assigned id
    /// * `Err(RepositoryError::Conflict)` - If the identity number is already registered
    async fn create_patient(&self, patient: NewPatient) -> RepositoryResult<Patient>;

    /// All patients by id; `NotFound` when there are none.
    async fn list_patients(&self) -> RepositoryResult<Vec<Patient>>;

    async fn get_patient(&self, patient_id: PatientId) -> RepositoryResult<Patient>;

    /// Replace age, contact and address.
    async fn update_patient(
        &self,
        patient_id: PatientId,
        update: PatientUpdate,
    ) -> RepositoryResult<Patient>;

    async fn delete_patient(&self, patient_id: PatientId) -> RepositoryResult<()>;
}
