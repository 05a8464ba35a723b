//! The schedule aggregate: one clinic's appointments over a date range.
//!
//! [`Schedule`] is the consistency boundary. Every mutation validates its
//! preconditions first, then changes the collection, re-runs the full
//! conflict pass and appends one domain event. A failed precondition leaves
//! the collection, the flags and the event log untouched.

use serde::Serialize;

use crate::appointment::Appointment;
use crate::conflict::{find_conflicts, mark_conflicting_appointments, AppointmentConflict};
use crate::error::{ensure_db_id, ensure_entity_id, CoreError};
use crate::events::{EventLog, ScheduleEvent};
use crate::time_range::TimeRange;
use crate::types::{DbId, EntityId};

#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    id: EntityId,
    clinic_id: DbId,
    date_range: TimeRange,
    appointments: Vec<Appointment>,
    #[serde(skip)]
    events: EventLog,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new(id: EntityId, date_range: TimeRange, clinic_id: DbId) -> Result<Self, CoreError> {
        Ok(Self {
            id: ensure_entity_id(id, "id")?,
            clinic_id: ensure_db_id(clinic_id, "clinic_id")?,
            date_range,
            appointments: Vec::new(),
            events: EventLog::new(),
        })
    }

    /// Rebuild a schedule from a complete, already-loaded snapshot.
    ///
    /// Flags are recomputed rather than trusted. No event is raised.
    pub fn from_parts(
        id: EntityId,
        date_range: TimeRange,
        clinic_id: DbId,
        appointments: Vec<Appointment>,
    ) -> Result<Self, CoreError> {
        let mut schedule = Self::new(id, date_range, clinic_id)?;

        for (i, appointment) in appointments.iter().enumerate() {
            ensure_appointment_ids(appointment)?;
            if appointments[..i].iter().any(|a| a.id() == appointment.id()) {
                return Err(CoreError::DuplicateAppointment {
                    id: appointment.id(),
                });
            }
        }

        schedule.appointments = appointments;
        schedule.mark_conflicting_appointments();
        Ok(schedule)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn clinic_id(&self) -> DbId {
        self.clinic_id
    }

    pub fn date_range(&self) -> &TimeRange {
        &self.date_range
    }

    /// Appointments in insertion order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn appointment(&self, id: EntityId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Appointments currently flagged as potentially conflicting.
    pub fn conflicting_appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.is_potentially_conflicting())
    }

    /// Every conflicting pair with the rules it violates.
    pub fn conflicts(&self) -> Vec<AppointmentConflict> {
        find_conflicts(&self.appointments)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a new appointment and raise `AppointmentScheduled`.
    pub fn add_new_appointment(&mut self, appointment: Appointment) -> Result<(), CoreError> {
        ensure_appointment_ids(&appointment)?;

        if self.appointments.iter().any(|a| a.id() == appointment.id()) {
            tracing::warn!(
                schedule_id = %self.id,
                appointment_id = %appointment.id(),
                "Rejected duplicate appointment"
            );
            return Err(CoreError::DuplicateAppointment {
                id: appointment.id(),
            });
        }

        self.appointments.push(appointment);
        self.mark_conflicting_appointments();

        // Snapshot after marking so the event carries the current flag.
        let Some(added) = self.appointments.last().cloned() else {
            return Ok(());
        };
        tracing::debug!(
            schedule_id = %self.id,
            appointment_id = %added.id(),
            conflicting = added.is_potentially_conflicting(),
            "Appointment scheduled"
        );
        self.events
            .push(ScheduleEvent::AppointmentScheduled { appointment: added });
        Ok(())
    }

    /// Remove the stored appointment with the same id as `appointment`, if any,
    /// and raise `AppointmentDeleted` for the argument either way.
    pub fn delete_appointment(&mut self, appointment: &Appointment) {
        let position = self
            .appointments
            .iter()
            .position(|a| a.id() == appointment.id());

        if let Some(index) = position {
            self.appointments.remove(index);
        }

        self.mark_conflicting_appointments();

        tracing::debug!(
            schedule_id = %self.id,
            appointment_id = %appointment.id(),
            removed = position.is_some(),
            "Appointment deleted"
        );
        self.events.push(ScheduleEvent::AppointmentDeleted {
            appointment: appointment.clone(),
        });
    }

    /// Resynchronize conflict flags after appointments were edited in place.
    ///
    /// Does not touch the collection and raises no event.
    pub fn appointment_updated_handler(&mut self) {
        self.mark_conflicting_appointments();
    }

    /// Mutable access for in-place edits. Call
    /// [`appointment_updated_handler`](Self::appointment_updated_handler)
    /// once done, or use [`update_appointment`](Self::update_appointment).
    pub fn appointment_mut(&mut self, id: EntityId) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id() == id)
    }

    /// Apply `update` to the appointment with `id`, then re-run conflict
    /// marking. Returns `Ok(false)` if no such appointment exists.
    ///
    /// Flags are recomputed even when `update` fails, since it may have
    /// changed some fields before returning the error.
    pub fn update_appointment<F>(&mut self, id: EntityId, update: F) -> Result<bool, CoreError>
    where
        F: FnOnce(&mut Appointment) -> Result<(), CoreError>,
    {
        let Some(appointment) = self.appointment_mut(id) else {
            return Ok(false);
        };
        let result = update(appointment);
        self.appointment_updated_handler();
        result.map(|()| true)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Events raised since the last drain, oldest first.
    pub fn events(&self) -> &[ScheduleEvent] {
        self.events.as_slice()
    }

    /// Drain pending events for dispatch.
    pub fn take_events(&mut self) -> Vec<ScheduleEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn mark_conflicting_appointments(&mut self) {
        let flagged = mark_conflicting_appointments(&mut self.appointments);
        tracing::trace!(
            schedule_id = %self.id,
            appointments = self.appointments.len(),
            flagged,
            "Conflict pass complete"
        );
    }
}

/// The appointment id must be non-nil and its patient, doctor and room keys
/// positive, the same rules the in-place setters apply.
fn ensure_appointment_ids(appointment: &Appointment) -> Result<(), CoreError> {
    ensure_entity_id(appointment.id(), "appointment.id")?;
    ensure_db_id(appointment.patient_id(), "patient_id")?;
    ensure_db_id(appointment.doctor_id(), "doctor_id")?;
    ensure_db_id(appointment.room_id(), "room_id")?;
    Ok(())
}
