//! Hand-off from a schedule's pending events to the [`EventBus`].
//!
//! Call [`dispatch_schedule_events`] once the caller's unit of work has
//! committed. The schedule's event list is drained even when some events
//! fail to encode; those are logged and skipped.

use frontdesk_core::Schedule;

use crate::bus::{EventBus, PlatformEvent};

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Events drained from the schedule.
    pub drained: usize,
    /// Events delivered to at least one subscriber.
    pub published: usize,
}

/// Drain `schedule`'s events and publish each one on `bus`, oldest first.
pub fn dispatch_schedule_events(bus: &EventBus, schedule: &mut Schedule) -> DispatchSummary {
    let events = schedule.take_events();
    let mut summary = DispatchSummary {
        drained: events.len(),
        published: 0,
    };

    for event in &events {
        match PlatformEvent::from_schedule_event(schedule.id(), schedule.clinic_id(), event) {
            Ok(envelope) => {
                if bus.publish(envelope) > 0 {
                    summary.published += 1;
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = event.event_type(),
                    appointment_id = %event.appointment().id(),
                    "Failed to encode schedule event"
                );
            }
        }
    }

    tracing::debug!(
        schedule_id = %schedule.id(),
        drained = summary.drained,
        published = summary.published,
        "Dispatched schedule events"
    );
    summary
}
