//! # Remote Registry
//!
//! One isolation boundary per configured remote, created on first lookup
//! and cached for the process lifetime. Descriptors are looked up by name
//! and never duplicated. Asking for an unconfigured name is a wiring
//! defect and fails loudly.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use mosaic_boundary::IsolationBoundary;
use mosaic_loader::ModuleLoader;
use shared_bus::EventBus;
use shared_types::RemoteAppConfig;

use crate::container::HostContainer;

/// Registry errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested name has no configured descriptor.
    #[error("no remote named `{0}` is configured")]
    UnknownRemote(String),
}

/// Name-keyed registry of remote mount points.
pub struct RemoteRegistry {
    descriptors: BTreeMap<String, RemoteAppConfig>,
    loader: Arc<ModuleLoader>,
    bus: Arc<EventBus>,
    boundaries: RwLock<HashMap<String, Arc<IsolationBoundary>>>,
}

impl RemoteRegistry {
    /// Build a registry over the container's configured remotes.
    #[must_use]
    pub fn new(container: &HostContainer) -> Self {
        Self {
            descriptors: container.config().remotes.clone(),
            loader: container.loader(),
            bus: container.bus(),
            boundaries: RwLock::new(HashMap::new()),
        }
    }

    /// Configured remote names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.descriptors.keys().cloned().collect()
    }

    /// The descriptor for `name`, if configured.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&RemoteAppConfig> {
        self.descriptors.get(name)
    }

    /// The mount point for `name`: its lazily-loaded module wrapped in an
    /// isolation boundary. One boundary exists per remote; repeated lookups
    /// return the same instance.
    pub fn outlet(&self, name: &str) -> Result<Arc<IsolationBoundary>, RegistryError> {
        if let Some(existing) = self.boundaries.read().get(name) {
            return Ok(Arc::clone(existing));
        }

        let descriptor = self
            .descriptors
            .get(name)
            .ok_or_else(|| RegistryError::UnknownRemote(name.to_string()))?
            .clone();

        let mut boundaries = self.boundaries.write();
        let boundary = boundaries.entry(name.to_string()).or_insert_with(|| {
            debug!(module = %name, "creating isolation boundary");
            Arc::new(IsolationBoundary::new(
                self.loader.load(descriptor),
                Arc::clone(&self.bus),
            ))
        });
        Ok(Arc::clone(boundary))
    }
}
