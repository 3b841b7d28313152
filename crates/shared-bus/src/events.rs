//! # Host Events
//!
//! Defines every event that flows through the shared bus, the topics they
//! map to, and the subscription filter.
//!
//! Topic names and payload field names are the versioned cross-module
//! contract (`PROTOCOL_VERSION`): remote modules built against them must
//! keep working across host releases. `HostEvent::payload` produces exactly
//! the wire shape a module observes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{HealthRecord, Identity, PerformanceMetrics};

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// The active identity changed.
    /// Source: Session Manager.
    AuthChanged {
        /// The new identity; `None` after sign-out.
        user: Option<Identity>,
        /// Which transition produced this event.
        #[serde(rename = "type")]
        kind: AuthTransition,
    },

    /// A shared-store entry was replaced.
    /// Source: Shared Data Store.
    StateChanged {
        /// The entry key.
        key: String,
        /// The full new value; `null` when the entry was removed.
        value: Value,
    },

    /// A route transition was initiated.
    /// Source: Navigation Bridge. Published after the underlying navigation
    /// primitive has been invoked, never before.
    Navigated {
        /// Target path.
        path: String,
        /// Transition kind; `back` transitions are never published.
        #[serde(rename = "type")]
        kind: NavigationKind,
    },

    /// A remote module faulted inside its isolation boundary.
    /// Source: Isolation Boundary.
    RemoteFaulted {
        /// The faulted module's name.
        name: String,
        /// The failure message.
        error: String,
        /// Where the failure was contained.
        #[serde(rename = "errorInfo")]
        error_info: String,
    },

    /// Page load timing was sampled.
    /// Source: Performance sampler, once per page load.
    PerformanceSampled {
        /// The sampled application's name.
        #[serde(rename = "appName")]
        app_name: String,
        /// The measurements.
        metrics: PerformanceMetrics,
    },

    /// A liveness probe cycle refreshed one target's record.
    /// Source: Health Monitor.
    HealthChanged(HealthRecord),
}

impl HostEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AuthChanged { .. } => EventTopic::AuthChange,
            Self::StateChanged { .. } => EventTopic::StateChange,
            Self::Navigated { .. } => EventTopic::Navigation,
            Self::RemoteFaulted { .. } => EventTopic::RemoteError,
            Self::PerformanceSampled { .. } => EventTopic::Performance,
            Self::HealthChanged(_) => EventTopic::Health,
        }
    }

    /// The wire-contract payload, without the enum wrapper.
    ///
    /// This is the exact JSON shape a cross-module listener observes for the
    /// event's topic.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::AuthChanged { user, kind } => json!({ "user": user, "type": kind }),
            Self::StateChanged { key, value } => json!({ "key": key, "value": value }),
            Self::Navigated { path, kind } => json!({ "path": path, "type": kind }),
            Self::RemoteFaulted {
                name,
                error,
                error_info,
            } => json!({ "name": name, "error": error, "errorInfo": error_info }),
            Self::PerformanceSampled { app_name, metrics } => {
                json!({ "appName": app_name, "metrics": metrics })
            }
            Self::HealthChanged(record) => json!(record),
        }
    }
}

/// Which session transition produced an `auth-change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTransition {
    /// Successful sign-in.
    Login,
    /// Sign-out; the payload carries no user.
    Logout,
    /// Successful sign-up.
    Signup,
}

/// Kind of a route transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    /// A new history entry.
    Push,
    /// Replacement of the current entry.
    Replace,
    /// Backward navigation. Part of the data model; the bridge never
    /// publishes it (no deterministic target path is known up front).
    Back,
}

/// Event topics for subscription filtering.
///
/// `as_str` values are the wire-level topic names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventTopic {
    /// Session Manager events.
    AuthChange,
    /// Shared Data Store events.
    StateChange,
    /// Navigation Bridge events.
    Navigation,
    /// Isolation Boundary events.
    RemoteError,
    /// Performance sampler events.
    Performance,
    /// Health Monitor events.
    Health,
}

impl EventTopic {
    /// The wire-level topic name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthChange => "auth-change",
            Self::StateChange => "state-change",
            Self::Navigation => "navigation",
            Self::RemoteError => "remote-error",
            Self::Performance => "performance",
            Self::Health => "health",
        }
    }
}

impl std::fmt::Display for EventTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Create a filter for a single topic.
    #[must_use]
    pub fn topic(topic: EventTopic) -> Self {
        Self {
            topics: vec![topic],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &HostEvent) -> bool {
        self.topics.is_empty() || self.topics.contains(&event.topic())
    }
}
