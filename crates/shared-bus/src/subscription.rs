//! # Subscriptions
//!
//! The subscribing side of the bus.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::bus::Registration;

/// Handle for one bus registration.
///
/// When dropped, the registration is removed. Dropping the guard during a
/// delivery pass does not affect that pass (delivery runs on a snapshot).
pub struct SubscriberGuard {
    /// The registration this guard owns.
    id: u64,

    /// Registration list shared with the bus (for removal).
    registrations: Arc<RwLock<Vec<Registration>>>,
}

impl SubscriberGuard {
    pub(crate) fn new(id: u64, registrations: Arc<RwLock<Vec<Registration>>>) -> Self {
        Self { id, registrations }
    }

    /// The registration id, unique within the owning bus.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the registration now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.registrations.write().retain(|r| r.id != self.id);
        debug!(listener = self.id, "bus subscription dropped");
    }
}
