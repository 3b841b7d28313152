//! # Provider Wiring
//!
//! Builds the long-lived shared providers in phase order and hands out the
//! composition surface remote modules mount against.
//!
//! ## Initialization Order
//!
//! ```text
//! Phase 1: Broadcast bus (shared infrastructure)
//! Phase 2: Session manager (persists under the storage data dir)
//! Phase 3: Shared state store, navigation bridge
//! Phase 4: Module loader (remote provider + local fallback registry)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use mosaic_loader::{
    LocalFallbackProvider, ModuleContext, ModuleLoader, ModuleProvider, RemoteProvider,
    ResolutionStrategy,
};
use mosaic_monitor::{HealthMonitor, HealthTarget, HttpProbe, MonitorHandle};
use mosaic_router::{HistoryNavigator, RouterBridge};
use mosaic_session::{JsonFileStore, SessionManager};
use mosaic_state::SharedStateStore;
use shared_bus::EventBus;

use crate::container::config::HostConfig;

/// Central container holding the shared providers.
///
/// Built once at boot; every provider lives for the process lifetime.
pub struct HostContainer {
    /// Broadcast bus, the only cross-module coordination channel.
    bus: Arc<EventBus>,

    /// Session manager owning the identity lifecycle.
    session: Arc<SessionManager>,

    /// Cross-module shared data store.
    shared_state: Arc<SharedStateStore>,

    /// Navigation bridge over the host's history primitive.
    router: Arc<RouterBridge>,

    /// Remote module loader.
    loader: Arc<ModuleLoader>,

    /// Local fallback registry; the host registers stand-ins here.
    local_modules: Arc<LocalFallbackProvider>,

    /// Host configuration (immutable after initialization).
    config: HostConfig,
}

impl HostContainer {
    /// Create a container with all providers initialized.
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        info!("initializing mosaic host container");

        // =====================================================================
        // PHASE 1: Shared Infrastructure
        // =====================================================================
        let bus = Arc::new(EventBus::new());
        info!("phase 1: broadcast bus ready");

        // =====================================================================
        // PHASE 2: Session Manager
        // =====================================================================
        let store = JsonFileStore::new(config.storage.data_dir.clone());
        let session = Arc::new(SessionManager::new(Arc::clone(&bus), Box::new(store)));
        info!(
            data_dir = %config.storage.data_dir.display(),
            provider = %config.auth.provider,
            "phase 2: session manager ready"
        );

        // =====================================================================
        // PHASE 3: Shared State + Navigation
        // =====================================================================
        let shared_state = Arc::new(SharedStateStore::new(Arc::clone(&bus)));
        let router = Arc::new(RouterBridge::new(
            Box::new(HistoryNavigator::new()),
            Arc::clone(&bus),
        ));
        info!("phase 3: shared state store and navigation bridge ready");

        // =====================================================================
        // PHASE 4: Remote Module Loader
        // =====================================================================
        let local_modules = Arc::new(LocalFallbackProvider::new());
        let strategy = Arc::new(ResolutionStrategy::new(
            Arc::new(RemoteProvider::new()),
            Arc::clone(&local_modules) as Arc<dyn ModuleProvider>,
        ));
        let loader = Arc::new(ModuleLoader::new(strategy));
        info!(
            remotes = config.remotes.len(),
            "phase 4: module loader ready"
        );

        Self {
            bus,
            session,
            shared_state,
            router,
            loader,
            local_modules,
            config,
        }
    }

    /// The composition surface for one mount: bus, shared store, and the
    /// session as of now.
    #[must_use]
    pub fn module_context(&self) -> ModuleContext {
        ModuleContext::new(
            Arc::clone(&self.bus),
            Arc::clone(&self.shared_state),
            self.session.snapshot(),
        )
    }

    /// Start the liveness loop over the configured remotes.
    ///
    /// Returns `None` when monitoring is disabled.
    #[must_use]
    pub fn start_monitor(&self) -> Option<MonitorHandle> {
        if !self.config.monitoring.enabled {
            info!("health monitoring disabled by configuration");
            return None;
        }

        let targets: Vec<HealthTarget> = self
            .config
            .remotes
            .values()
            .map(|remote| HealthTarget {
                name: remote.name.clone(),
                url: remote.url.clone(),
            })
            .collect();

        let monitor = HealthMonitor::new(targets, Arc::new(HttpProbe::new()), Arc::clone(&self.bus))
            .with_interval(Duration::from_secs(self.config.monitoring.probe_interval_secs));
        Some(monitor.start())
    }

    // =========================================================================
    // ACCESSOR METHODS
    // =========================================================================

    /// Get the broadcast bus.
    #[must_use]
    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    /// Get the session manager.
    #[must_use]
    pub fn session(&self) -> Arc<SessionManager> {
        Arc::clone(&self.session)
    }

    /// Get the shared data store.
    #[must_use]
    pub fn shared_state(&self) -> Arc<SharedStateStore> {
        Arc::clone(&self.shared_state)
    }

    /// Get the navigation bridge.
    #[must_use]
    pub fn router(&self) -> Arc<RouterBridge> {
        Arc::clone(&self.router)
    }

    /// Get the module loader.
    #[must_use]
    pub fn loader(&self) -> Arc<ModuleLoader> {
        Arc::clone(&self.loader)
    }

    /// Get the local fallback registry.
    #[must_use]
    pub fn local_modules(&self) -> Arc<LocalFallbackProvider> {
        Arc::clone(&self.local_modules)
    }

    /// Get the host configuration.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}
