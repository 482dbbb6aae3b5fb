use proptest::prelude::*;

use super::*;
use crate::db::repository::ErrorKind;
use crate::models::{NewPatient, PatientUpdate, ScheduleFields};

fn new_patient(identity_number: i64) -> NewPatient {
    NewPatient {
        name: format!("Patient {identity_number}"),
        identity_number,
        age: 30,
        gender: "F".to_string(),
        contact: "0800-000".to_string(),
        address: "Jl. Merdeka 1".to_string(),
    }
}

fn slot(date: &str, time: &str, max_slot: u32) -> ScheduleFields {
    ScheduleFields {
        day: "Monday".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        max_slot,
    }
}

/// Ledger with `patients` patients and one schedule per entry of `capacities`.
fn seeded(patients: i64, capacities: &[u32]) -> (ClinicData, Vec<PatientId>, Vec<ScheduleId>) {
    let mut data = ClinicData::new();
    let patient_ids: Vec<PatientId> = (1..=patients)
        .map(|n| create_patient(&mut data, new_patient(1000 + n)).unwrap().id)
        .collect();
    let schedule_ids: Vec<ScheduleId> = capacities
        .iter()
        .enumerate()
        .map(|(i, &cap)| {
            create_schedule(&mut data, slot("2024-03-04", &format!("{:02}:00", 8 + i), cap))
                .unwrap()
                .id
        })
        .collect();
    (data, patient_ids, schedule_ids)
}

fn queue_numbers(data: &ClinicData, schedule_id: ScheduleId) -> Vec<u32> {
    list_by_schedule(data, schedule_id)
        .into_iter()
        .map(|r| r.queue_number)
        .collect()
}

/// Every schedule holds queue numbers exactly 1..=k with k <= max_slot.
fn assert_queues_dense(data: &ClinicData) {
    for schedule_id in data.booked_schedule_ids() {
        let numbers = queue_numbers(data, schedule_id);
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected, "queue on schedule {schedule_id} is not dense");
        if let Ok(schedule) = get_schedule(data, schedule_id) {
            assert!(numbers.len() as u32 <= schedule.max_slot);
        }
    }
}

// =========================================================
// Book
// =========================================================

#[test]
fn test_second_booking_gets_queue_two_and_third_is_rejected() {
    let (mut data, patients, schedules) = seeded(3, &[2]);

    let first = book(&mut data, patients[0], schedules[0]).unwrap();
    let second = book(&mut data, patients[1], schedules[0]).unwrap();
    assert_eq!(first.queue_number, 1);
    assert_eq!(second.queue_number, 2);

    let err = book(&mut data, patients[2], schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(err.message(), "the queue on this schedule is full");
    assert_eq!(data.reservation_count(), 2);
}

#[test]
fn test_duplicate_booking_conflicts() {
    let (mut data, patients, schedules) = seeded(1, &[5]);
    book(&mut data, patients[0], schedules[0]).unwrap();

    let err = book(&mut data, patients[0], schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(data.reservation_count(), 1);
}

#[test]
fn test_same_patient_may_book_different_schedules() {
    let (mut data, patients, schedules) = seeded(1, &[1, 1]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    let b = book(&mut data, patients[0], schedules[1]).unwrap();
    assert_eq!(a.queue_number, 1);
    assert_eq!(b.queue_number, 1);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_book_unknown_patient_or_schedule() {
    let (mut data, patients, schedules) = seeded(1, &[1]);

    let err = book(&mut data, PatientId::new(99), schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Patient not found");

    let err = book(&mut data, patients[0], ScheduleId::new(99)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Schedule not found");
}

#[test]
fn test_duplicate_check_precedes_capacity_check() {
    let (mut data, patients, schedules) = seeded(1, &[1]);
    book(&mut data, patients[0], schedules[0]).unwrap();

    // The schedule is full and the pair is booked: the pair wins.
    let err = book(&mut data, patients[0], schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_rebooking_after_cancel_starts_at_front() {
    let (mut data, patients, schedules) = seeded(1, &[3]);
    let r = book(&mut data, patients[0], schedules[0]).unwrap();
    cancel(&mut data, r.id).unwrap();

    let again = book(&mut data, patients[0], schedules[0]).unwrap();
    assert_eq!(again.queue_number, 1);
    assert_ne!(again.id, r.id);
}

#[test]
fn test_reservation_ids_are_not_reused() {
    let (mut data, patients, schedules) = seeded(2, &[3]);
    let first = book(&mut data, patients[0], schedules[0]).unwrap();
    let second = book(&mut data, patients[1], schedules[0]).unwrap();
    cancel(&mut data, second.id).unwrap();

    let third = book(&mut data, patients[1], schedules[0]).unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}

// =========================================================
// Cancel
// =========================================================

#[test]
fn test_cancel_middle_closes_gap() {
    let (mut data, patients, schedules) = seeded(3, &[3]);
    let r1 = book(&mut data, patients[0], schedules[0]).unwrap();
    let r2 = book(&mut data, patients[1], schedules[0]).unwrap();
    let r3 = book(&mut data, patients[2], schedules[0]).unwrap();

    cancel(&mut data, r2.id).unwrap();

    assert_eq!(get_reservation(&data, r1.id).unwrap().queue_number, 1);
    assert_eq!(get_reservation(&data, r3.id).unwrap().queue_number, 2);
    assert_eq!(queue_numbers(&data, schedules[0]), vec![1, 2]);
}

#[test]
fn test_cancel_leaves_other_schedules_alone() {
    let (mut data, patients, schedules) = seeded(2, &[2, 2]);
    let a1 = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[0], schedules[1]).unwrap();
    book(&mut data, patients[1], schedules[1]).unwrap();

    cancel(&mut data, a1.id).unwrap();
    assert_eq!(queue_numbers(&data, schedules[0]), vec![1]);
    assert_eq!(queue_numbers(&data, schedules[1]), vec![1, 2]);
}

#[test]
fn test_cancel_unknown_reservation() {
    let mut data = ClinicData::new();
    let err = cancel(&mut data, ReservationId::new(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Reservation not found");
}

// =========================================================
// Reassign
// =========================================================

#[test]
fn test_reassign_moves_to_back_of_target_queue() {
    let (mut data, patients, schedules) = seeded(3, &[3, 3]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    let b = book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[2], schedules[1]).unwrap();

    let moved = reassign(&mut data, a.id, schedules[1]).unwrap();
    assert_eq!(moved.schedule_id, schedules[1]);
    assert_eq!(moved.queue_number, 2);
    assert_eq!(moved.patient_id, patients[0]);

    assert_eq!(get_reservation(&data, b.id).unwrap().queue_number, 1);
    assert_queues_dense(&data);
}

#[test]
fn test_reassign_is_not_invertible() {
    let (mut data, patients, schedules) = seeded(3, &[3, 3]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[2], schedules[0]).unwrap();

    reassign(&mut data, a.id, schedules[1]).unwrap();
    let back = reassign(&mut data, a.id, schedules[0]).unwrap();

    assert_eq!(a.queue_number, 1);
    assert_eq!(back.queue_number, 3);
    assert_queues_dense(&data);
}

#[test]
fn test_reassign_within_schedule_goes_last() {
    let (mut data, patients, schedules) = seeded(3, &[4]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[2], schedules[0]).unwrap();

    let moved = reassign(&mut data, a.id, schedules[0]).unwrap();
    assert_eq!(moved.queue_number, 3);
    assert_queues_dense(&data);
}

#[test]
fn test_reassign_within_full_schedule_is_rejected() {
    let (mut data, patients, schedules) = seeded(2, &[2]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();

    let err = reassign(&mut data, a.id, schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(get_reservation(&data, a.id).unwrap().queue_number, 1);
}

#[test]
fn test_reassign_to_full_schedule_changes_nothing() {
    let (mut data, patients, schedules) = seeded(2, &[2, 1]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    let b = book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[1]).unwrap();

    let err = reassign(&mut data, a.id, schedules[1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(get_reservation(&data, a.id).unwrap(), a);
    assert_eq!(get_reservation(&data, b.id).unwrap(), b);
}

#[test]
fn test_reassign_onto_own_duplicate_conflicts() {
    let (mut data, patients, schedules) = seeded(1, &[2, 2]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[0], schedules[1]).unwrap();

    let err = reassign(&mut data, a.id, schedules[1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(queue_numbers(&data, schedules[1]), vec![1]);
}

#[test]
fn test_reassign_unknown_ids() {
    let (mut data, patients, schedules) = seeded(1, &[2]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();

    let err = reassign(&mut data, ReservationId::new(42), schedules[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = reassign(&mut data, a.id, ScheduleId::new(42)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// =========================================================
// Listing
// =========================================================

#[test]
fn test_list_all_empty_is_not_found_but_by_schedule_is_empty() {
    let data = ClinicData::new();
    assert_eq!(list_all(&data).unwrap_err().kind(), ErrorKind::NotFound);
    assert!(list_by_schedule(&data, ScheduleId::new(7)).is_empty());
}

#[test]
fn test_list_by_schedule_is_in_queue_order() {
    let (mut data, patients, schedules) = seeded(3, &[3, 3]);
    let a = book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();
    book(&mut data, patients[2], schedules[1]).unwrap();
    // a moves out and back: it now trails patient 1.
    reassign(&mut data, a.id, schedules[1]).unwrap();
    reassign(&mut data, a.id, schedules[0]).unwrap();

    let queue = list_by_schedule(&data, schedules[0]);
    let patients_in_order: Vec<PatientId> = queue.iter().map(|r| r.patient_id).collect();
    assert_eq!(patients_in_order, vec![patients[1], patients[0]]);
    assert_eq!(list_all(&data).unwrap().len(), 3);
}

// =========================================================
// Records
// =========================================================

#[test]
fn test_patient_identity_number_is_unique() {
    let mut data = ClinicData::new();
    create_patient(&mut data, new_patient(1)).unwrap();
    let err = create_patient(&mut data, new_patient(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.message(), "The patient has registered");
}

#[test]
fn test_patient_ids_survive_deletion() {
    let mut data = ClinicData::new();
    let p1 = create_patient(&mut data, new_patient(1)).unwrap();
    let p2 = create_patient(&mut data, new_patient(2)).unwrap();
    delete_patient(&mut data, p1.id).unwrap();
    let p3 = create_patient(&mut data, new_patient(3)).unwrap();
    assert_eq!(p3.id, p2.id.next());
    assert_eq!(list_patients(&data).unwrap().len(), 2);
}

#[test]
fn test_update_patient_changes_only_mutable_fields() {
    let mut data = ClinicData::new();
    let p = create_patient(&mut data, new_patient(5)).unwrap();
    let updated = update_patient(
        &mut data,
        p.id,
        PatientUpdate {
            age: 41,
            contact: "0811".to_string(),
            address: "Jl. Sudirman 2".to_string(),
        },
    )
    .unwrap();
    assert_eq!(updated.age, 41);
    assert_eq!(updated.name, p.name);
    assert_eq!(updated.identity_number, p.identity_number);
}

#[test]
fn test_list_records_empty_is_not_found() {
    let data = ClinicData::new();
    assert_eq!(list_patients(&data).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(list_schedules(&data).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_schedule_slot_is_unique() {
    let mut data = ClinicData::new();
    create_schedule(&mut data, slot("2024-03-04", "09:00", 2)).unwrap();
    let err = create_schedule(&mut data, slot("2024-03-04", "09:00", 5)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.message(), "Schedule already exist");

    create_schedule(&mut data, slot("2024-03-04", "10:00", 2)).unwrap();
    assert_eq!(data.schedule_count(), 2);
}

#[test]
fn test_zero_capacity_schedule_is_rejected() {
    let mut data = ClinicData::new();
    let err = create_schedule(&mut data, slot("2024-03-04", "09:00", 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_update_schedule_keeps_invariants() {
    let (mut data, patients, schedules) = seeded(2, &[3, 3]);
    book(&mut data, patients[0], schedules[0]).unwrap();
    book(&mut data, patients[1], schedules[0]).unwrap();

    // Same slot as itself is fine.
    let mut fields = slot("2024-03-04", "08:00", 2);
    let updated = update_schedule(&mut data, schedules[0], fields.clone()).unwrap();
    assert_eq!(updated.max_slot, 2);

    fields.max_slot = 1;
    let err = update_schedule(&mut data, schedules[0], fields).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    // Taking the other schedule's slot collides.
    let err = update_schedule(&mut data, schedules[0], slot("2024-03-04", "09:00", 3)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_deleted_records_resolve_to_none() {
    let (mut data, patients, schedules) = seeded(1, &[2]);
    let r = book(&mut data, patients[0], schedules[0]).unwrap();

    delete_patient(&mut data, patients[0]).unwrap();
    delete_schedule(&mut data, schedules[0]).unwrap();

    let details = data.details(&get_reservation(&data, r.id).unwrap());
    assert!(details.patient.is_none());
    assert!(details.booked.is_none());
    assert_eq!(list_by_schedule(&data, schedules[0]).len(), 1);
}

#[test]
fn test_details_follow_record_edits() {
    let (mut data, patients, schedules) = seeded(1, &[2]);
    let r = book(&mut data, patients[0], schedules[0]).unwrap();
    update_patient(
        &mut data,
        patients[0],
        PatientUpdate {
            age: 77,
            contact: "new".to_string(),
            address: "new".to_string(),
        },
    )
    .unwrap();

    let details = data.details(&r);
    assert_eq!(details.patient.map(|p| p.age), Some(77));
}

// =========================================================
// Properties
// =========================================================

#[derive(Debug, Clone)]
enum Op {
    Book { patient: usize, schedule: usize },
    Reassign { reservation: usize, schedule: usize },
    Cancel { reservation: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, 0..3usize).prop_map(|(patient, schedule)| Op::Book { patient, schedule }),
        (0..16usize, 0..3usize)
            .prop_map(|(reservation, schedule)| Op::Reassign { reservation, schedule }),
        (0..16usize).prop_map(|reservation| Op::Cancel { reservation }),
    ]
}

proptest! {
    #[test]
    fn prop_queues_stay_dense_and_within_capacity(
        ops in proptest::collection::vec(op_strategy(), 1..60)
    ) {
        let (mut data, patients, schedules) = seeded(6, &[1, 2, 4]);

        for op in ops {
            let before = data.clone();
            let result = match op {
                Op::Book { patient, schedule } => {
                    book(&mut data, patients[patient], schedules[schedule]).map(|_| ())
                }
                Op::Reassign { reservation, schedule } => {
                    let ids = data.reservation_ids();
                    match ids.get(reservation % ids.len().max(1)) {
                        Some(&id) => reassign(&mut data, id, schedules[schedule]).map(|_| ()),
                        None => Ok(()),
                    }
                }
                Op::Cancel { reservation } => {
                    let ids = data.reservation_ids();
                    match ids.get(reservation % ids.len().max(1)) {
                        Some(&id) => cancel(&mut data, id),
                        None => Ok(()),
                    }
                }
            };

            if result.is_err() {
                // Rejected operations leave the ledger untouched.
                prop_assert_eq!(data.reservation_ids(), before.reservation_ids());
                for id in data.reservation_ids() {
                    prop_assert_eq!(
                        get_reservation(&data, id).unwrap(),
                        get_reservation(&before, id).unwrap()
                    );
                }
            }

            assert_queues_dense(&data);

            // At most one reservation per (patient, schedule) pair.
            let mut pairs: Vec<_> = list_all(&data)
                .unwrap_or_default()
                .into_iter()
                .map(|r| (r.patient_id, r.schedule_id))
                .collect();
            let total = pairs.len();
            pairs.sort();
            pairs.dedup();
            prop_assert_eq!(pairs.len(), total);
        }
    }
}
