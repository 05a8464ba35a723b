//! Domain events raised by the schedule aggregate.
//!
//! Events accumulate on the aggregate instance until a collaborator drains
//! them with [`Schedule::take_events`](crate::schedule::Schedule::take_events),
//! typically after its unit of work commits.

use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;

/// Event type names, used as the dispatch key downstream.
pub mod event_types {
    pub const APPOINTMENT_SCHEDULED: &str = "appointment.scheduled";
    pub const APPOINTMENT_DELETED: &str = "appointment.deleted";
}

/// Something that happened inside a schedule.
///
/// Each variant carries a snapshot of the affected appointment taken when the
/// event was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleEvent {
    #[serde(rename = "appointment.scheduled")]
    AppointmentScheduled { appointment: Appointment },

    #[serde(rename = "appointment.deleted")]
    AppointmentDeleted { appointment: Appointment },
}

impl ScheduleEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AppointmentScheduled { .. } => event_types::APPOINTMENT_SCHEDULED,
            Self::AppointmentDeleted { .. } => event_types::APPOINTMENT_DELETED,
        }
    }

    pub fn appointment(&self) -> &Appointment {
        match self {
            Self::AppointmentScheduled { appointment }
            | Self::AppointmentDeleted { appointment } => appointment,
        }
    }
}

/// Append-only event list owned by one aggregate instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    pending: Vec<ScheduleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ScheduleEvent) {
        self.pending.push(event);
    }

    pub fn as_slice(&self) -> &[ScheduleEvent] {
        &self.pending
    }

    /// Remove and return every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<ScheduleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
