//! Booking, reassignment and cancellation of reservations.
//!
//! Every write here leaves the queue of each affected schedule dense:
//! removing a reservation from a queue shifts everyone behind it forward
//! by one, and new arrivals always join at the back.

use tracing::{debug, info, warn};

use super::ClinicData;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{PatientId, Reservation, ReservationId, ScheduleId};

const SCHEDULE_FULL: &str = "the queue on this schedule is full";

/// Book `patient_id` onto the back of `schedule_id`'s queue.
///
/// Checks run in order: patient exists, schedule exists, the pair is not
/// already booked, the schedule has a free slot.
pub fn book(
    data: &mut ClinicData,
    patient_id: PatientId,
    schedule_id: ScheduleId,
) -> RepositoryResult<Reservation> {
    if !data.patients.contains_key(&patient_id) {
        return Err(RepositoryError::not_found_with_context(
            "Patient not found",
            ErrorContext::new("book")
                .with_entity("patient")
                .with_entity_id(patient_id),
        ));
    }

    let max_slot = data
        .schedules
        .get(&schedule_id)
        .map(|s| s.max_slot)
        .ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Schedule not found",
                ErrorContext::new("book")
                    .with_entity("schedule")
                    .with_entity_id(schedule_id),
            )
        })?;

    let already_booked = data
        .reservations
        .values()
        .any(|r| r.patient_id == patient_id && r.is_on(schedule_id));
    if already_booked {
        warn!(%patient_id, %schedule_id, "rejected duplicate booking");
        return Err(RepositoryError::conflict_with_context(
            "You have made a reservation on that schedule",
            ErrorContext::new("book")
                .with_entity("reservation")
                .with_details(format!("patient_id={patient_id}, schedule_id={schedule_id}")),
        ));
    }

    let queued = data.queue_len(schedule_id);
    if queued >= max_slot {
        warn!(%schedule_id, max_slot, "rejected booking on full schedule");
        return Err(RepositoryError::capacity_exceeded_with_context(
            SCHEDULE_FULL,
            ErrorContext::new("book")
                .with_entity("schedule")
                .with_entity_id(schedule_id)
                .with_details(format!("max_slot={max_slot}")),
        ));
    }

    let reservation = Reservation {
        id: data.allocate_reservation_id(),
        patient_id,
        schedule_id,
        queue_number: queued + 1,
    };
    data.reservations.insert(reservation.id, reservation.clone());

    info!(
        reservation_id = %reservation.id,
        %patient_id,
        %schedule_id,
        queue_number = reservation.queue_number,
        "reservation booked"
    );
    Ok(reservation)
}

/// Reservations on `schedule_id`, front of the queue first.
///
/// The schedule does not have to exist; an unknown id yields an empty list.
pub fn list_by_schedule(data: &ClinicData, schedule_id: ScheduleId) -> Vec<Reservation> {
    let mut queue: Vec<Reservation> = data
        .reservations
        .values()
        .filter(|r| r.is_on(schedule_id))
        .cloned()
        .collect();
    queue.sort_by_key(|r| r.queue_number);
    debug!(%schedule_id, count = queue.len(), "listed reservations by schedule");
    queue
}

/// Every reservation, by id. An empty ledger is reported as `NotFound`.
pub fn list_all(data: &ClinicData) -> RepositoryResult<Vec<Reservation>> {
    if data.reservations.is_empty() {
        return Err(RepositoryError::not_found_with_context(
            "Data not found",
            ErrorContext::new("list_reservations").with_entity("reservation"),
        ));
    }
    Ok(data.reservations.values().cloned().collect())
}

pub fn get_reservation(
    data: &ClinicData,
    reservation_id: ReservationId,
) -> RepositoryResult<Reservation> {
    data.reservations
        .get(&reservation_id)
        .cloned()
        .ok_or_else(|| reservation_not_found("get_reservation", reservation_id))
}

/// Move a reservation to the back of `new_schedule_id`'s queue.
///
/// Capacity on the target is checked before the reservation leaves its
/// current queue, so a reservation on a full schedule cannot be moved
/// within that same schedule. The patient must not already hold another
/// reservation on the target. Moving away and back does not restore the
/// original queue number.
pub fn reassign(
    data: &mut ClinicData,
    reservation_id: ReservationId,
    new_schedule_id: ScheduleId,
) -> RepositoryResult<Reservation> {
    let current = data
        .reservations
        .get(&reservation_id)
        .cloned()
        .ok_or_else(|| reservation_not_found("reassign", reservation_id))?;

    let max_slot = data
        .schedules
        .get(&new_schedule_id)
        .map(|s| s.max_slot)
        .ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Clinic schedule not found",
                ErrorContext::new("reassign")
                    .with_entity("schedule")
                    .with_entity_id(new_schedule_id),
            )
        })?;

    if data.queue_len(new_schedule_id) >= max_slot {
        warn!(%reservation_id, %new_schedule_id, max_slot, "rejected reassignment to full schedule");
        return Err(RepositoryError::capacity_exceeded_with_context(
            SCHEDULE_FULL,
            ErrorContext::new("reassign")
                .with_entity("schedule")
                .with_entity_id(new_schedule_id)
                .with_details(format!("max_slot={max_slot}")),
        ));
    }

    let already_booked = data.reservations.values().any(|r| {
        r.id != reservation_id && r.patient_id == current.patient_id && r.is_on(new_schedule_id)
    });
    if already_booked {
        warn!(%reservation_id, %new_schedule_id, "rejected reassignment onto a duplicate booking");
        return Err(RepositoryError::conflict_with_context(
            "You have made a reservation on that schedule",
            ErrorContext::new("reassign")
                .with_entity("reservation")
                .with_entity_id(reservation_id)
                .with_details(format!(
                    "patient_id={}, schedule_id={new_schedule_id}",
                    current.patient_id
                )),
        ));
    }

    close_gap(data, current.schedule_id, current.queue_number, reservation_id);

    reservation_mut(data, reservation_id)?.schedule_id = new_schedule_id;
    // The moved reservation is already counted here, which puts it last.
    let queue_number = data.queue_len(new_schedule_id);
    let moved = reservation_mut(data, reservation_id)?;
    moved.queue_number = queue_number;

    info!(
        %reservation_id,
        from_schedule = %current.schedule_id,
        to_schedule = %new_schedule_id,
        old_queue_number = current.queue_number,
        queue_number,
        "reservation reassigned"
    );
    Ok(moved.clone())
}

/// Remove a reservation and pull everyone behind it forward.
pub fn cancel(data: &mut ClinicData, reservation_id: ReservationId) -> RepositoryResult<()> {
    let cancelled = data
        .reservations
        .get(&reservation_id)
        .cloned()
        .ok_or_else(|| reservation_not_found("cancel", reservation_id))?;

    close_gap(data, cancelled.schedule_id, cancelled.queue_number, reservation_id);
    data.reservations.remove(&reservation_id);

    info!(
        %reservation_id,
        schedule_id = %cancelled.schedule_id,
        queue_number = cancelled.queue_number,
        "reservation cancelled"
    );
    Ok(())
}

/// Shift every reservation on `schedule_id` queued behind `vacated` one
/// place forward, leaving `leaving` untouched.
fn close_gap(
    data: &mut ClinicData,
    schedule_id: ScheduleId,
    vacated: u32,
    leaving: ReservationId,
) {
    data.reservations
        .values_mut()
        .filter(|r| r.is_on(schedule_id) && r.id != leaving && r.queue_number > vacated)
        .for_each(|r| r.queue_number -= 1);
}

fn reservation_mut(
    data: &mut ClinicData,
    reservation_id: ReservationId,
) -> RepositoryResult<&mut Reservation> {
    data.reservations
        .get_mut(&reservation_id)
        .ok_or_else(|| reservation_not_found("reassign", reservation_id))
}

fn reservation_not_found(operation: &str, reservation_id: ReservationId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "Reservation not found",
        ErrorContext::new(operation)
            .with_entity("reservation")
            .with_entity_id(reservation_id),
    )
}
