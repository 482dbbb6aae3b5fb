//! Patient and schedule record management.
//!
//! Deleting a patient or schedule leaves its reservations in place; they
//! keep their queue positions and resolve the missing record to `None`.

use tracing::{debug, info};

use super::ClinicData;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{
    ClinicSchedule, NewPatient, Patient, PatientId, PatientUpdate, ScheduleFields, ScheduleId,
};

// =============================================================================
// Patients
// =============================================================================

pub fn create_patient(data: &mut ClinicData, request: NewPatient) -> RepositoryResult<Patient> {
    let registered = data
        .patients
        .values()
        .any(|p| p.identity_number == request.identity_number);
    if registered {
        return Err(RepositoryError::conflict_with_context(
            "The patient has registered",
            ErrorContext::new("create_patient")
                .with_entity("patient")
                .with_details(format!("identity_number={}", request.identity_number)),
        ));
    }

    let patient = request.into_patient(data.allocate_patient_id());
    data.patients.insert(patient.id, patient.clone());
    info!(patient_id = %patient.id, "patient registered");
    Ok(patient)
}

/// Every patient, by id. An empty collection is reported as `NotFound`.
pub fn list_patients(data: &ClinicData) -> RepositoryResult<Vec<Patient>> {
    if data.patients.is_empty() {
        return Err(RepositoryError::not_found_with_context(
            "Data not found",
            ErrorContext::new("list_patients").with_entity("patient"),
        ));
    }
    Ok(data.patients.values().cloned().collect())
}

pub fn get_patient(data: &ClinicData, patient_id: PatientId) -> RepositoryResult<Patient> {
    data.patients
        .get(&patient_id)
        .cloned()
        .ok_or_else(|| patient_not_found("get_patient", patient_id))
}

pub fn update_patient(
    data: &mut ClinicData,
    patient_id: PatientId,
    update: PatientUpdate,
) -> RepositoryResult<Patient> {
    let patient = data
        .patients
        .get_mut(&patient_id)
        .ok_or_else(|| patient_not_found("update_patient", patient_id))?;
    patient.apply(update);
    debug!(%patient_id, "patient updated");
    Ok(patient.clone())
}

pub fn delete_patient(data: &mut ClinicData, patient_id: PatientId) -> RepositoryResult<()> {
    data.patients
        .remove(&patient_id)
        .ok_or_else(|| patient_not_found("delete_patient", patient_id))?;
    info!(%patient_id, "patient deleted");
    Ok(())
}

fn patient_not_found(operation: &str, patient_id: PatientId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "Patient not found",
        ErrorContext::new(operation)
            .with_entity("patient")
            .with_entity_id(patient_id),
    )
}

// =============================================================================
// Schedules
// =============================================================================

pub fn create_schedule(
    data: &mut ClinicData,
    fields: ScheduleFields,
) -> RepositoryResult<ClinicSchedule> {
    validate_max_slot("create_schedule", fields.max_slot)?;
    ensure_slot_free(data, "create_schedule", &fields, None)?;

    let schedule = fields.into_schedule(data.allocate_schedule_id());
    data.schedules.insert(schedule.id, schedule.clone());
    info!(
        schedule_id = %schedule.id,
        date = %schedule.date,
        time = %schedule.time,
        max_slot = schedule.max_slot,
        "schedule created"
    );
    Ok(schedule)
}

/// Every schedule, by id. An empty collection is reported as `NotFound`.
pub fn list_schedules(data: &ClinicData) -> RepositoryResult<Vec<ClinicSchedule>> {
    if data.schedules.is_empty() {
        return Err(RepositoryError::not_found_with_context(
            "Data not found",
            ErrorContext::new("list_schedules").with_entity("schedule"),
        ));
    }
    Ok(data.schedules.values().cloned().collect())
}

pub fn get_schedule(data: &ClinicData, schedule_id: ScheduleId) -> RepositoryResult<ClinicSchedule> {
    data.schedules
        .get(&schedule_id)
        .cloned()
        .ok_or_else(|| schedule_not_found("get_schedule", schedule_id))
}

/// Replace a schedule's fields.
///
/// Rejects a (date, time) already used by another schedule, and a
/// `max_slot` smaller than the number of reservations already queued.
pub fn update_schedule(
    data: &mut ClinicData,
    schedule_id: ScheduleId,
    fields: ScheduleFields,
) -> RepositoryResult<ClinicSchedule> {
    if !data.schedules.contains_key(&schedule_id) {
        return Err(schedule_not_found("update_schedule", schedule_id));
    }
    validate_max_slot("update_schedule", fields.max_slot)?;
    ensure_slot_free(data, "update_schedule", &fields, Some(schedule_id))?;

    let queued = data.queue_len(schedule_id);
    if fields.max_slot < queued {
        return Err(RepositoryError::capacity_exceeded_with_context(
            format!("the schedule already holds {queued} reservations"),
            ErrorContext::new("update_schedule")
                .with_entity("schedule")
                .with_entity_id(schedule_id)
                .with_details(format!("max_slot={}", fields.max_slot)),
        ));
    }

    let schedule = data
        .schedules
        .get_mut(&schedule_id)
        .ok_or_else(|| schedule_not_found("update_schedule", schedule_id))?;
    schedule.apply(fields);
    debug!(%schedule_id, "schedule updated");
    Ok(schedule.clone())
}

pub fn delete_schedule(data: &mut ClinicData, schedule_id: ScheduleId) -> RepositoryResult<()> {
    data.schedules
        .remove(&schedule_id)
        .ok_or_else(|| schedule_not_found("delete_schedule", schedule_id))?;
    info!(%schedule_id, "schedule deleted");
    Ok(())
}

fn validate_max_slot(operation: &str, max_slot: u32) -> RepositoryResult<()> {
    if max_slot == 0 {
        return Err(RepositoryError::validation_with_context(
            "max_slot must be at least 1",
            ErrorContext::new(operation).with_entity("schedule"),
        ));
    }
    Ok(())
}

/// The (date, time) pair must not belong to any schedule other than `own`.
fn ensure_slot_free(
    data: &ClinicData,
    operation: &str,
    fields: &ScheduleFields,
    own: Option<ScheduleId>,
) -> RepositoryResult<()> {
    let taken = data
        .schedules
        .values()
        .any(|s| Some(s.id) != own && s.occupies(&fields.date, &fields.time));
    if taken {
        return Err(RepositoryError::conflict_with_context(
            "Schedule already exist",
            ErrorContext::new(operation)
                .with_entity("schedule")
                .with_details(format!("date={}, time={}", fields.date, fields.time)),
        ));
    }
    Ok(())
}

fn schedule_not_found(operation: &str, schedule_id: ScheduleId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "Clinic schedule not found",
        ErrorContext::new(operation)
            .with_entity("schedule")
            .with_entity_id(schedule_id),
    )
}
