//! Reservation records.

use serde::{Deserialize, Serialize};

use super::{ClinicSchedule, Patient, PatientId, ScheduleId};

crate::define_record_id!(ReservationId);

/// A patient's place in the queue of one clinic schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub patient_id: PatientId,
    pub schedule_id: ScheduleId,
    /// 1-based position in the schedule's queue. Dense per schedule.
    pub queue_number: u32,
}

impl Reservation {
    pub fn is_on(&self, schedule_id: ScheduleId) -> bool {
        self.schedule_id == schedule_id
    }
}

/// A reservation with its patient and schedule resolved.
///
/// `patient` or `booked` is `None` when the referenced record was deleted
/// after the booking was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub id: ReservationId,
    pub patient: Option<Patient>,
    pub booked: Option<ClinicSchedule>,
    pub queue_number: u32,
}
