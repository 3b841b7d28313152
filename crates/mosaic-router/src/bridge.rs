//! # Router Bridge
//!
//! The cross-module navigation surface. Performs the underlying navigation
//! first, then publishes the transition.

use std::sync::Arc;

use shared_bus::{EventBus, HostEvent, NavigationKind};
use tracing::debug;

use crate::navigator::Navigator;

/// Cross-module navigation bridge.
pub struct RouterBridge {
    navigator: Box<dyn Navigator>,
    bus: Arc<EventBus>,
}

impl RouterBridge {
    /// Create a bridge driving `navigator` and broadcasting on `bus`.
    #[must_use]
    pub fn new(navigator: Box<dyn Navigator>, bus: Arc<EventBus>) -> Self {
        Self { navigator, bus }
    }

    /// Navigate forward to `path` and broadcast the transition.
    pub fn push(&self, path: &str) {
        self.navigator.navigate(path);
        debug!(%path, "navigation push");
        self.bus.publish(HostEvent::Navigated {
            path: path.to_string(),
            kind: NavigationKind::Push,
        });
    }

    /// Replace the current route with `path` and broadcast the transition.
    pub fn replace(&self, path: &str) {
        self.navigator.replace(path);
        debug!(%path, "navigation replace");
        self.bus.publish(HostEvent::Navigated {
            path: path.to_string(),
            kind: NavigationKind::Replace,
        });
    }

    /// Navigate backward. Publishes nothing: no deterministic target path
    /// is known ahead of completion.
    pub fn back(&self) {
        self.navigator.back();
        debug!("navigation back");
    }

    /// The path currently shown.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }
}
