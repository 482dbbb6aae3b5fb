//! Data Transfer Objects for the HTTP API.
//!
//! Every endpoint except `/health` answers with an [`Envelope`]. Record
//! payloads reuse the domain types from [`crate::models`], which already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::models::{
    ClinicSchedule, NewPatient, Patient, PatientUpdate, ReservationDetails, ScheduleFields,
};

/// Uniform response wrapper: `{"Status": bool, "Message": string, "Data": any}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Status")]
    pub status: bool,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Successful response without a `Data` field (deletions).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Failure response; `Data` is an empty object.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: Some(serde_json::Value::Object(serde_json::Map::new())),
        }
    }
}

/// Request body for booking a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReservationRequest {
    pub patient_id: i64,
    pub clinic_schedule_id: i64,
}

/// Query parameters for moving a reservation to another schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignQuery {
    pub clinic_schedule_id: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage status
    pub storage: String,
}
