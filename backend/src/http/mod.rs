//! HTTP server module for the clinic service.
//!
//! This module provides an axum-based HTTP server that exposes the
//! reservation ledger and the patient/schedule records as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing (rejections → 400 envelopes)           │
//! │  - {Status, Message, Data} envelopes                      │
//! │  - CORS, compression, error → status mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository: one lock around the ledger            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
