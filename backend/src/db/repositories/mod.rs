//! Repository implementations module.
//!
//! - `local`: In-memory implementation backing the service
pub mod local;

pub use local::LocalRepository;
