//! Clinic schedule records.
//!
//! A schedule is one bookable time-slot. `date` and `time` are kept as the
//! strings the client supplied; together they identify the slot.

use serde::{Deserialize, Serialize};

crate::define_record_id!(ScheduleId);

/// A clinic time-slot with a fixed reservation capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSchedule {
    pub id: ScheduleId,
    pub day: String,
    pub date: String,
    pub time: String,
    /// Maximum number of reservations the slot accepts.
    pub max_slot: u32,
}

impl ClinicSchedule {
    /// Whether this schedule occupies the given (date, time) slot.
    pub fn occupies(&self, date: &str, time: &str) -> bool {
        self.date == date && self.time == time
    }

    pub(crate) fn apply(&mut self, fields: ScheduleFields) {
        self.day = fields.day;
        self.date = fields.date;
        self.time = fields.time;
        self.max_slot = fields.max_slot;
    }
}

/// Payload for creating or replacing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFields {
    pub day: String,
    pub date: String,
    pub time: String,
    pub max_slot: u32,
}

impl ScheduleFields {
    pub(crate) fn into_schedule(self, id: ScheduleId) -> ClinicSchedule {
        ClinicSchedule {
            id,
            day: self.day,
            date: self.date,
            time: self.time,
            max_slot: self.max_slot,
        }
    }
}
