//! # Remote Module Capability
//!
//! The contract every loaded remote implements, and the context the host
//! hands it at mount time. The context is the *only* composition surface a
//! remote may touch: the bus, the shared store, and a read-only session
//! snapshot.

use std::sync::Arc;

use mosaic_state::SharedStateStore;
use shared_bus::EventBus;
use shared_types::{RemoteEntryManifest, SessionSnapshot};
use thiserror::Error;

/// Failure raised while a module mounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// The module could not produce a view.
    #[error("module `{name}` failed to mount: {detail}")]
    Mount {
        /// The failing module's name.
        name: String,
        /// What went wrong.
        detail: String,
    },
}

/// What the host hands a module when mounting it.
#[derive(Clone)]
pub struct ModuleContext {
    /// The cross-module broadcast bus.
    pub bus: Arc<EventBus>,
    /// The cross-module shared store.
    pub shared_state: Arc<SharedStateStore>,
    /// Read-only session view at mount time; modules subscribe to
    /// `auth-change` for updates.
    pub session: SessionSnapshot,
}

impl ModuleContext {
    /// Bundle the composition surface for one mount.
    #[must_use]
    pub fn new(
        bus: Arc<EventBus>,
        shared_state: Arc<SharedStateStore>,
        session: SessionSnapshot,
    ) -> Self {
        Self {
            bus,
            shared_state,
            session,
        }
    }
}

/// The rendered output of a mounted module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleView {
    /// Name of the module that produced the view.
    pub module: String,
    /// Rendered body.
    pub body: String,
}

/// An independently built unit of UI/logic, loaded by name into the host.
pub trait RemoteModule: Send + Sync {
    /// The remote's name (matches its descriptor).
    fn name(&self) -> &str;

    /// Produce the module's view. May fail, or panic, without taking the
    /// host down: the isolation boundary contains both.
    fn mount(&self, ctx: &ModuleContext) -> Result<ModuleView, ModuleError>;
}

/// A module materialized from a fetched remote-entry manifest.
pub struct ManifestModule {
    manifest: RemoteEntryManifest,
}

impl ManifestModule {
    /// Wrap a fetched manifest.
    #[must_use]
    pub fn new(manifest: RemoteEntryManifest) -> Self {
        Self { manifest }
    }

    /// The manifest this module was built from.
    #[must_use]
    pub fn manifest(&self) -> &RemoteEntryManifest {
        &self.manifest
    }
}

impl RemoteModule for ManifestModule {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn mount(&self, ctx: &ModuleContext) -> Result<ModuleView, ModuleError> {
        let viewer = ctx
            .session
            .user
            .as_ref()
            .map_or("guest", |user| user.display_name.as_str());

        let version = if self.manifest.version.is_empty() {
            "unversioned"
        } else {
            self.manifest.version.as_str()
        };

        Ok(ModuleView {
            module: self.manifest.name.clone(),
            body: format!("{} ({version}) for {viewer}", self.manifest.name),
        })
    }
}
