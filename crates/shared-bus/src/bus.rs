//! # Event Bus
//!
//! The publishing side of the bus. An `EventBus` is an explicit, constructed
//! object handed to every component at construction time, never a hidden
//! module-level singleton, which keeps composition testable and
//! lifecycle-bound.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::events::{EventFilter, HostEvent};
use crate::subscription::SubscriberGuard;

/// A registered listener callback.
pub(crate) type Listener = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// One registration on the bus.
pub(crate) struct Registration {
    pub(crate) id: u64,
    pub(crate) filter: EventFilter,
    pub(crate) listener: Listener,
}

/// In-process broadcast bus with synchronous, registration-ordered delivery.
///
/// Delivery operates on a snapshot of the registration list taken at publish
/// time: listeners added or removed during a pass do not affect that pass,
/// and a listener may publish (or subscribe) from inside its own callback
/// because no lock is held while callbacks run.
pub struct EventBus {
    /// Registered listeners in registration order.
    registrations: Arc<RwLock<Vec<Registration>>>,

    /// Monotonic registration id source.
    next_id: AtomicU64,

    /// Total events published.
    events_published: AtomicU64,
}

impl EventBus {
    /// Create a new, empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicU64::new(0),
            events_published: AtomicU64::new(0),
        }
    }

    /// Register a listener for events matching `filter`.
    ///
    /// Returns a guard that unsubscribes on drop. Listeners are invoked in
    /// registration order.
    #[must_use]
    pub fn subscribe<F>(&self, filter: EventFilter, listener: F) -> SubscriberGuard
    where
        F: Fn(&HostEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registrations.write().push(Registration {
            id,
            filter,
            listener: Arc::new(listener),
        });

        debug!(listener = id, "new bus subscription");
        SubscriberGuard::new(id, Arc::clone(&self.registrations))
    }

    /// Publish an event to every currently-registered matching listener.
    ///
    /// Delivery is synchronous and in registration order. A panicking
    /// listener is contained and logged; delivery continues with the next
    /// listener.
    ///
    /// # Returns
    ///
    /// The number of listeners the event was delivered to.
    pub fn publish(&self, event: HostEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // Snapshot the matching listeners, then release the lock before any
        // callback runs. Nested publish/subscribe from inside a callback is
        // therefore lock-free with respect to this pass.
        let pass: Vec<Listener> = {
            let registrations = self.registrations.read();
            registrations
                .iter()
                .filter(|r| r.filter.matches(&event))
                .map(|r| Arc::clone(&r.listener))
                .collect()
        };

        for listener in &pass {
            if catch_unwind(AssertUnwindSafe(|| listener(&event))).is_err() {
                warn!(
                    topic = %event.topic(),
                    "listener panicked during delivery; continuing with remaining listeners"
                );
            }
        }

        debug!(topic = %event.topic(), receivers = pass.len(), "event published");
        pass.len()
    }

    /// Get the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registrations.read().len()
    }

    /// Get the total number of events published.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
