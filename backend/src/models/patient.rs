//! Patient records.

use serde::{Deserialize, Serialize};

crate::define_record_id!(PatientId);

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    /// National identity number; unique across all patients.
    pub identity_number: i64,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub address: String,
}

/// Payload for registering a new patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub identity_number: i64,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub address: String,
}

impl NewPatient {
    pub(crate) fn into_patient(self, id: PatientId) -> Patient {
        Patient {
            id,
            name: self.name,
            identity_number: self.identity_number,
            age: self.age,
            gender: self.gender,
            contact: self.contact,
            address: self.address,
        }
    }
}

/// Mutable subset of a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub age: u32,
    pub contact: String,
    pub address: String,
}

impl Patient {
    pub(crate) fn apply(&mut self, update: PatientUpdate) {
        self.age = update.age;
        self.contact = update.contact;
        self.address = update.address;
    }
}
