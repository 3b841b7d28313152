//! # Diagnostics Wiring
//!
//! Host-level subscriptions wired at boot: contained remote faults surface
//! as error logs, down health targets as warnings, and every topic is
//! traced at debug level for operability.

use std::sync::Arc;

use shared_bus::{EventBus, EventFilter, EventTopic, HostEvent, SubscriberGuard};
use shared_types::HealthStatus;
use tracing::{debug, error, warn};

/// Keeps the diagnostic subscriptions alive. Dropping it unwires them.
pub struct DiagnosticsWiring {
    _guards: Vec<SubscriberGuard>,
}

/// Subscribe the host-level diagnostics on `bus`.
#[must_use]
pub fn wire_diagnostics(bus: &Arc<EventBus>) -> DiagnosticsWiring {
    let mut guards = Vec::new();

    guards.push(bus.subscribe(
        EventFilter::topic(EventTopic::RemoteError),
        |event| {
            if let HostEvent::RemoteFaulted { name, error, .. } = event {
                error!(module = %name, %error, "remote module fault contained");
            }
        },
    ));

    guards.push(bus.subscribe(EventFilter::topic(EventTopic::Health), |event| {
        if let HostEvent::HealthChanged(record) = event {
            if record.status == HealthStatus::Down {
                warn!(
                    target = %record.target,
                    error = record.error_detail.as_deref().unwrap_or("unknown"),
                    "remote target is down"
                );
            }
        }
    }));

    guards.push(bus.subscribe(EventFilter::all(), |event| {
        debug!(topic = %event.topic(), "bus event");
    }));

    DiagnosticsWiring { _guards: guards }
}
