//! The reservation ledger.
//!
//! [`ClinicData`] owns the three record collections (patients, schedules,
//! reservations) and the id counters. Ledger operations are free functions
//! taking the context explicitly; they are synchronous and assume the caller
//! holds exclusive access for the whole call, which is what
//! [`LocalRepository`](crate::db::repositories::LocalRepository) guarantees.
//!
//! # Queue invariants
//!
//! For every schedule `S` holding `k` reservations:
//!
//! - the queue numbers on `S` are exactly `1..=k`
//! - `k <= S.max_slot`
//! - no two reservations on `S` belong to the same patient
//!
//! [`queue`] maintains these across book, reassign and cancel;
//! [`records`] keeps schedule edits from breaking them.

pub mod queue;
pub mod records;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::models::{
    ClinicSchedule, Patient, PatientId, Reservation, ReservationDetails, ReservationId,
    ScheduleId,
};

pub use queue::{book, cancel, get_reservation, list_all, list_by_schedule, reassign};
pub use records::{
    create_patient, create_schedule, delete_patient, delete_schedule, get_patient, get_schedule,
    list_patients, list_schedules, update_patient, update_schedule,
};

/// Owning context for every collection the ledger reads or writes.
#[derive(Debug, Clone)]
pub struct ClinicData {
    patients: BTreeMap<PatientId, Patient>,
    schedules: BTreeMap<ScheduleId, ClinicSchedule>,
    reservations: BTreeMap<ReservationId, Reservation>,

    // Counters only move forward; ids are never reused after deletion.
    next_patient_id: PatientId,
    next_schedule_id: ScheduleId,
    next_reservation_id: ReservationId,
}

impl Default for ClinicData {
    fn default() -> Self {
        Self {
            patients: BTreeMap::new(),
            schedules: BTreeMap::new(),
            reservations: BTreeMap::new(),
            next_patient_id: PatientId::FIRST,
            next_schedule_id: ScheduleId::FIRST,
            next_reservation_id: ReservationId::FIRST,
        }
    }
}

impl ClinicData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_count(&self) -> usize {
        self.schedules.len()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    /// Number of reservations currently queued on `schedule_id`.
    pub fn queue_len(&self, schedule_id: ScheduleId) -> u32 {
        self.reservations
            .values()
            .filter(|r| r.is_on(schedule_id))
            .count() as u32
    }

    /// Reservation ids currently held.
    pub fn reservation_ids(&self) -> Vec<ReservationId> {
        self.reservations.keys().copied().collect()
    }

    /// Ids of every schedule referenced by a reservation, including
    /// schedules that have since been deleted.
    pub fn booked_schedule_ids(&self) -> Vec<ScheduleId> {
        let mut ids: Vec<ScheduleId> = self.reservations.values().map(|r| r.schedule_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Resolve a reservation's references into the records it points at.
    /// Deleted patients or schedules resolve to `None`.
    pub fn details(&self, reservation: &Reservation) -> ReservationDetails {
        ReservationDetails {
            id: reservation.id,
            patient: self.patients.get(&reservation.patient_id).cloned(),
            booked: self.schedules.get(&reservation.schedule_id).cloned(),
            queue_number: reservation.queue_number,
        }
    }

    fn allocate_patient_id(&mut self) -> PatientId {
        let id = self.next_patient_id;
        self.next_patient_id = id.next();
        id
    }

    fn allocate_schedule_id(&mut self) -> ScheduleId {
        let id = self.next_schedule_id;
        self.next_schedule_id = id.next();
        id
    }

    fn allocate_reservation_id(&mut self) -> ReservationId {
        let id = self.next_reservation_id;
        self.next_reservation_id = id.next();
        id
    }
}
