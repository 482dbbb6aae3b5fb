//! # Clinic Reservations
//!
//! In-memory bookkeeping for a clinic: patients, clinic schedules (time-slots
//! with a fixed capacity) and the reservations that queue patients onto
//! schedules.
//!
//! ## Architecture
//!
//! - [`ledger`]: The reservation ledger. Owns the queue rules: capacity,
//!   one booking per patient per schedule, dense queue numbers.
//! - [`models`]: Patient, schedule and reservation records
//! - [`db`]: Repository traits and the lock-guarded in-memory repository
//! - [`config`]: Server configuration from TOML and the environment
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Nothing is persisted; state lives for the lifetime of the process.

pub mod config;
pub mod db;
pub mod ledger;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
