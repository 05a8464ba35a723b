//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans out [`PlatformEvent`]s to any number of subscribers
//! (UI notifiers, outbox writers). It is designed to be shared via
//! `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use frontdesk_core::types::DbId;
use frontdesk_core::ScheduleEvent;

use crate::config::EventBusConfig;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Envelope around a schedule event, tagged with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"appointment.scheduled"`.
    pub event_type: String,

    /// Schedule that raised the event.
    pub schedule_id: Uuid,

    /// Clinic owning that schedule.
    pub clinic_id: DbId,

    /// Affected appointment.
    pub appointment_id: Uuid,

    /// The full event, serialized.
    pub payload: serde_json::Value,

    /// When the event was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Wrap a drained schedule event.
    pub fn from_schedule_event(
        schedule_id: Uuid,
        clinic_id: DbId,
        event: &ScheduleEvent,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            schedule_id,
            clinic_id,
            appointment_id: event.appointment().id(),
            payload: serde_json::to_value(event)?,
            timestamp: Utc::now(),
        })
    }

    /// Decode the payload back into the schedule event.
    pub fn schedule_event(&self) -> Result<ScheduleEvent, serde_json::Error> {
        ScheduleEvent::deserialize(&self.payload)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use frontdesk_events::bus::EventBus;
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn from_config(config: &EventBusConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Publish to all current subscribers. Returns how many received it.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(
                    event_type = %event.event_type,
                    appointment_id = %event.appointment_id,
                    "No subscribers, event dropped"
                );
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::from_config(&EventBusConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
