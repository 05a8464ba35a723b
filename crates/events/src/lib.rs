//! Delivery of schedule domain events to in-process consumers.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: envelope around a drained
//!   [`ScheduleEvent`](frontdesk_core::ScheduleEvent).
//! - [`dispatch_schedule_events`]: drains a schedule and publishes its events.
//! - [`EventBusConfig`]: env-driven bus settings.

pub mod bus;
pub mod config;
pub mod dispatch;

pub use bus::{EventBus, PlatformEvent};
pub use config::{ConfigError, EventBusConfig};
pub use dispatch::{dispatch_schedule_events, DispatchSummary};
