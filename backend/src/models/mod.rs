//! Domain records for the clinic: patients, clinic schedules and reservations.
//!
//! Records are plain serde structs. Reservations refer to their patient and
//! schedule by id; the HTTP layer resolves those ids when rendering.

pub mod macros;
pub mod patient;
pub mod reservation;
pub mod schedule;

pub use patient::*;
pub use reservation::*;
pub use schedule::*;
