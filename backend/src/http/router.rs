//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS; the service has no authentication.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Reservation ledger
        .route("/reservation", post(handlers::create_reservation))
        .route(
            "/reservation/{reservation_id}",
            patch(handlers::update_reservation)
                .delete(handlers::delete_reservation),
        )
        .route("/reservations", get(handlers::list_reservations))
        .route(
            "/reservations/{clinic_schedule_id}",
            get(handlers::list_reservations_by_schedule),
        )
        // Clinic schedules
        .route("/clinic_schedule", post(handlers::create_clinic_schedule))
        .route(
            "/clinic_schedule/{clinic_schedule_id}",
            get(handlers::get_clinic_schedule)
                .patch(handlers::update_clinic_schedule)
                .delete(handlers::delete_clinic_schedule),
        )
        .route("/clinic_schedules", get(handlers::list_clinic_schedules))
        // Patients
        .route("/patient", post(handlers::create_patient))
        .route(
            "/patient/{patient_id}",
            get(handlers::get_patient)
                .patch(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .route("/patients", get(handlers::list_patients))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
