//! # Isolation Boundary
//!
//! A per-mount-point fault container: one boundary wraps exactly one remote
//! module and catches any failure (error or panic) raised while the module
//! resolves or mounts. This is the mechanism that keeps one remote's
//! defect from crashing the host shell or sibling modules.
//!
//! ## State Machine
//!
//! ```text
//! Stable ──failure during resolve/mount──→ Faulted
//!    ↑                                        │
//!    └──────────── explicit retry ────────────┘
//! ```
//!
//! While `Faulted`, mounting returns a recovery view without touching the
//! module; there is no auto-retry. The transition into `Faulted` publishes
//! one `remote-error` event.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::panic))]

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use shared_bus::{EventBus, HostEvent};
use tracing::{error, info};

use mosaic_loader::{LazyModule, ModuleContext, ModuleView};

/// Transient fault state of one boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolationState {
    /// True after a contained failure, until explicit recovery.
    pub has_fault: bool,
    /// Description of the contained failure.
    pub fault_detail: Option<String>,
}

/// What a mount attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryView {
    /// The wrapped module rendered.
    Ready(ModuleView),
    /// The boundary is faulted; show the recovery affordance.
    Recovery {
        /// The wrapped module's name.
        module: String,
        /// Description of the contained failure.
        detail: String,
    },
}

impl BoundaryView {
    /// True when the wrapped module rendered.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Supervisory wrapper around one lazily-loaded remote module.
pub struct IsolationBoundary {
    module_name: String,
    module: LazyModule,
    bus: Arc<EventBus>,
    state: Mutex<IsolationState>,
}

impl IsolationBoundary {
    /// Wrap `module`, publishing faults on `bus`.
    #[must_use]
    pub fn new(module: LazyModule, bus: Arc<EventBus>) -> Self {
        Self {
            module_name: module.descriptor().name.clone(),
            module,
            bus,
            state: Mutex::new(IsolationState::default()),
        }
    }

    /// The wrapped module's name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Current fault state.
    #[must_use]
    pub fn state(&self) -> IsolationState {
        self.state.lock().clone()
    }

    /// True while the boundary holds a contained fault.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        self.state.lock().has_fault
    }

    /// Mount the wrapped module.
    ///
    /// While faulted, returns the recovery view immediately; recovery is
    /// explicit, never automatic.
    pub async fn mount(&self, ctx: &ModuleContext) -> BoundaryView {
        let faulted = {
            let state = self.state.lock();
            state
                .has_fault
                .then(|| state.fault_detail.clone().unwrap_or_default())
        };
        if let Some(detail) = faulted {
            return BoundaryView::Recovery {
                module: self.module_name.clone(),
                detail,
            };
        }

        self.attempt(ctx).await
    }

    /// Reset the fault state and re-attempt exactly one mount.
    pub async fn retry(&self, ctx: &ModuleContext) -> BoundaryView {
        {
            let mut state = self.state.lock();
            state.has_fault = false;
            state.fault_detail = None;
        }
        info!(module = %self.module_name, "retrying faulted remote module");
        self.attempt(ctx).await
    }

    async fn attempt(&self, ctx: &ModuleContext) -> BoundaryView {
        let outcome = std::panic::AssertUnwindSafe(self.module.mount(ctx))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(view)) => BoundaryView::Ready(view),
            Ok(Err(load_error)) => self.fault(load_error.to_string()),
            Err(panic) => self.fault(panic_detail(panic.as_ref())),
        }
    }

    /// Record the fault, publish `remote-error`, and build the recovery
    /// view. The failure stops here: nothing propagates to the caller.
    fn fault(&self, detail: String) -> BoundaryView {
        {
            let mut state = self.state.lock();
            state.has_fault = true;
            state.fault_detail = Some(detail.clone());
        }

        error!(module = %self.module_name, error = %detail, "remote module faulted");
        self.bus.publish(HostEvent::RemoteFaulted {
            name: self.module_name.clone(),
            error: detail.clone(),
            error_info: format!(
                "contained by the isolation boundary around `{}`",
                self.module_name
            ),
        });

        BoundaryView::Recovery {
            module: self.module_name.clone(),
            detail,
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "module panicked".to_string()
    }
}
