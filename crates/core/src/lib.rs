//! Clinic schedule aggregate and appointment conflict engine.
//!
//! This crate has no internal deps and performs no I/O. Persistence,
//! identity generation and event delivery are left to the callers.

pub mod appointment;
pub mod conflict;
pub mod error;
pub mod events;
pub mod schedule;
pub mod time_range;
pub mod types;

pub use appointment::Appointment;
pub use conflict::{AppointmentConflict, ConflictKind};
pub use error::CoreError;
pub use events::ScheduleEvent;
pub use schedule::Schedule;
pub use time_range::TimeRange;
