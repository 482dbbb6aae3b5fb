//! HTTP handlers for the REST API.
//!
//! Each handler converts path/query/body input into domain ids and payloads,
//! calls the repository, and wraps the result in an [`Envelope`]. Input is
//! taken through the [`super::extract`] wrappers so rejections share the
//! failure envelope.

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    BookReservationRequest, ClinicSchedule, Envelope, HealthResponse, NewPatient, Patient,
    PatientUpdate, ReassignQuery, ReservationDetails, ScheduleFields,
};
use super::error::AppError;
use super::extract::{JsonBody, PathParam, QueryParams};
use super::state::AppState;
use crate::models::{PatientId, ReservationId, ScheduleId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<Envelope<T>>, AppError>;

/// Result type for handlers answering `201 Created`.
pub type CreatedResult<T> = Result<(StatusCode, Json<Envelope<T>>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = match state.repository.health_check().await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    })
}

// =============================================================================
// Reservations
// =============================================================================

/// POST /reservation
///
/// Book a patient onto the back of a schedule's queue.
pub async fn create_reservation(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<BookReservationRequest>,
) -> CreatedResult<ReservationDetails> {
    let reservation = state
        .repository
        .book(
            PatientId::new(request.patient_id),
            ScheduleId::new(request.clinic_schedule_id),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("Reservation success", reservation)),
    ))
}

/// GET /reservations/{clinic_schedule_id}
///
/// Reservations on one schedule in queue order; empty when none.
pub async fn list_reservations_by_schedule(
    State(state): State<AppState>,
    PathParam(clinic_schedule_id): PathParam<i64>,
) -> HandlerResult<Vec<ReservationDetails>> {
    let reservations = state
        .repository
        .list_reservations_by_schedule(ScheduleId::new(clinic_schedule_id))
        .await?;

    Ok(Json(Envelope::success(
        "Get reservations list by schedule success",
        reservations,
    )))
}

/// GET /reservations
pub async fn list_reservations(
    State(state): State<AppState>,
) -> HandlerResult<Vec<ReservationDetails>> {
    let reservations = state.repository.list_reservations().await?;
    Ok(Json(Envelope::success(
        "Get list reservations success",
        reservations,
    )))
}

/// PATCH /reservation/{reservation_id}?clinic_schedule_id=N
///
/// Move a reservation to the back of another schedule's queue.
pub async fn update_reservation(
    State(state): State<AppState>,
    PathParam(reservation_id): PathParam<i64>,
    QueryParams(query): QueryParams<ReassignQuery>,
) -> HandlerResult<ReservationDetails> {
    let reservation = state
        .repository
        .reassign(
            ReservationId::new(reservation_id),
            ScheduleId::new(query.clinic_schedule_id),
        )
        .await?;

    Ok(Json(Envelope::success(
        "Reservation updated successfully",
        reservation,
    )))
}

/// DELETE /reservation/{reservation_id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    PathParam(reservation_id): PathParam<i64>,
) -> HandlerResult<()> {
    state
        .repository
        .cancel(ReservationId::new(reservation_id))
        .await?;
    Ok(Json(Envelope::done("Reservation deleted successfully")))
}

// =============================================================================
// Clinic Schedules
// =============================================================================

/// POST /clinic_schedule
pub async fn create_clinic_schedule(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ScheduleFields>,
) -> CreatedResult<ClinicSchedule> {
    let schedule = state.repository.create_schedule(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("Create schedule success", schedule)),
    ))
}

/// GET /clinic_schedules
pub async fn list_clinic_schedules(
    State(state): State<AppState>,
) -> HandlerResult<Vec<ClinicSchedule>> {
    let schedules = state.repository.list_schedules().await?;
    Ok(Json(Envelope::success(
        "Get list clinic schedules success",
        schedules,
    )))
}

/// GET /clinic_schedule/{clinic_schedule_id}
pub async fn get_clinic_schedule(
    State(state): State<AppState>,
    PathParam(clinic_schedule_id): PathParam<i64>,
) -> HandlerResult<ClinicSchedule> {
    let schedule = state
        .repository
        .get_schedule(ScheduleId::new(clinic_schedule_id))
        .await?;
    Ok(Json(Envelope::success("Get clinic schedule success", schedule)))
}

/// PATCH /clinic_schedule/{clinic_schedule_id}
pub async fn update_clinic_schedule(
    State(state): State<AppState>,
    PathParam(clinic_schedule_id): PathParam<i64>,
    JsonBody(request): JsonBody<ScheduleFields>,
) -> HandlerResult<ClinicSchedule> {
    let schedule = state
        .repository
        .update_schedule(ScheduleId::new(clinic_schedule_id), request)
        .await?;
    Ok(Json(Envelope::success(
        "Clinic schedule updated successfully",
        schedule,
    )))
}

/// DELETE /clinic_schedule/{clinic_schedule_id}
pub async fn delete_clinic_schedule(
    State(state): State<AppState>,
    PathParam(clinic_schedule_id): PathParam<i64>,
) -> HandlerResult<()> {
    state
        .repository
        .delete_schedule(ScheduleId::new(clinic_schedule_id))
        .await?;
    Ok(Json(Envelope::done("Clinic schedule deleted successfully")))
}

// =============================================================================
// Patients
// =============================================================================

/// POST /patient
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewPatient>,
) -> CreatedResult<Patient> {
    let patient = state.repository.create_patient(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("Create patient success", patient)),
    ))
}

/// GET /patients
pub async fn list_patients(State(state): State<AppState>) -> HandlerResult<Vec<Patient>> {
    let patients = state.repository.list_patients().await?;
    Ok(Json(Envelope::success("Get list patients success", patients)))
}

/// GET /patient/{patient_id}
pub async fn get_patient(
    State(state): State<AppState>,
    PathParam(patient_id): PathParam<i64>,
) -> HandlerResult<Patient> {
    let patient = state
        .repository
        .get_patient(PatientId::new(patient_id))
        .await?;
    Ok(Json(Envelope::success("Get patient success", patient)))
}

/// PATCH /patient/{patient_id}
pub async fn update_patient(
    State(state): State<AppState>,
    PathParam(patient_id): PathParam<i64>,
    JsonBody(request): JsonBody<PatientUpdate>,
) -> HandlerResult<Patient> {
    let patient = state
        .repository
        .update_patient(PatientId::new(patient_id), request)
        .await?;
    Ok(Json(Envelope::success("Patient updated successfully", patient)))
}

/// DELETE /patient/{patient_id}
pub async fn delete_patient(
    State(state): State<AppState>,
    PathParam(patient_id): PathParam<i64>,
) -> HandlerResult<()> {
    state
        .repository
        .delete_patient(PatientId::new(patient_id))
        .await?;
    Ok(Json(Envelope::done("Patient deleted successfully")))
}
