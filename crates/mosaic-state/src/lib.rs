//! # Shared Data Store
//!
//! A keyed bag of cross-module values with last-writer-wins semantics.
//! Every mutation is broadcast on the `state-change` topic so independently
//! loaded modules can react without coupling to each other.
//!
//! Values are opaque to the store (`serde_json::Value`). There is no
//! multi-key transaction: callers needing atomicity across keys must encode
//! the composite as one key. A `set` to an equal value still publishes: the
//! store does not define value equality for opaque payloads, so listeners
//! that care about actual change must diff.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use shared_bus::{EventBus, HostEvent};
use tracing::debug;

/// Cross-module key/value store.
///
/// Entries are mutated only through [`set`](Self::set) and
/// [`remove`](Self::remove); no caller touches the underlying map directly.
/// Read-your-write holds within the same tick: `set` completes (including
/// its broadcast) before returning.
pub struct SharedStateStore {
    entries: RwLock<HashMap<String, Value>>,
    bus: Arc<EventBus>,
}

impl SharedStateStore {
    /// Create an empty store publishing to `bus`.
    #[must_use]
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            bus,
        }
    }

    /// Read the value for `key`.
    ///
    /// An unset key yields `None`, never a default guess.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    /// Replace the whole value for `key` and broadcast the mutation.
    ///
    /// Returns the previous value, if any.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let previous = self.entries.write().insert(key.clone(), value.clone());

        debug!(%key, replaced = previous.is_some(), "shared state updated");
        self.bus.publish(HostEvent::StateChanged { key, value });
        previous
    }

    /// Delete the entry for `key` and broadcast a `null` value.
    ///
    /// Returns the removed value, if any.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let previous = self.entries.write().remove(key);
        if previous.is_some() {
            debug!(%key, "shared state entry removed");
            self.bus.publish(HostEvent::StateChanged {
                key: key.to_string(),
                value: Value::Null,
            });
        }
        previous
    }

    /// Number of entries currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no entry is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
