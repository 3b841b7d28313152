//! # Loader and Lazy Modules
//!
//! `ModuleLoader::load` returns immediately; resolution happens on first
//! mount and suspends the caller until it completes or fails. A successful
//! resolution is cached for the module's lifetime; a failed one is not, so
//! a later mount (the boundary's retry path) re-attempts resolution.

use std::sync::Arc;

use shared_types::{FallbackBehavior, RemoteAppConfig};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::error::LoadError;
use crate::module::{ModuleContext, ModuleView, RemoteModule};
use crate::providers::ModuleProvider;

/// Selects between the primary (network) and fallback (local) providers.
pub struct ResolutionStrategy {
    primary: Arc<dyn ModuleProvider>,
    fallback: Arc<dyn ModuleProvider>,
}

impl ResolutionStrategy {
    /// Create a strategy over the two provider variants.
    #[must_use]
    pub fn new(primary: Arc<dyn ModuleProvider>, fallback: Arc<dyn ModuleProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Resolve `descriptor`: primary first, then (unless the descriptor
    /// opted out) the local fallback. Every failure is logged with the
    /// remote module's name.
    pub async fn resolve(
        &self,
        descriptor: &RemoteAppConfig,
    ) -> Result<Arc<dyn RemoteModule>, LoadError> {
        let primary_err = match self.primary.resolve(descriptor).await {
            Ok(module) => {
                debug!(module = %descriptor.name, "resolved from remote");
                return Ok(module);
            }
            Err(e) => e,
        };

        warn!(module = %descriptor.name, error = %primary_err, "remote resolution failed");

        if descriptor.fallback == FallbackBehavior::Fail {
            return Err(LoadError::Unresolvable {
                name: descriptor.name.clone(),
                detail: primary_err.to_string(),
            });
        }

        match self.fallback.resolve(descriptor).await {
            Ok(module) => {
                info!(module = %descriptor.name, "resolved via local fallback");
                Ok(module)
            }
            Err(fallback_err) => {
                error!(
                    module = %descriptor.name,
                    primary = %primary_err,
                    fallback = %fallback_err,
                    "remote module unresolvable"
                );
                Err(LoadError::Unresolvable {
                    name: descriptor.name.clone(),
                    detail: format!("{primary_err}; fallback: {fallback_err}"),
                })
            }
        }
    }
}

/// Builds lazy modules from descriptors. Performs no retry of its own.
pub struct ModuleLoader {
    strategy: Arc<ResolutionStrategy>,
}

impl ModuleLoader {
    /// Create a loader using `strategy` for every resolution.
    #[must_use]
    pub fn new(strategy: Arc<ResolutionStrategy>) -> Self {
        Self { strategy }
    }

    /// Wrap `descriptor` in a lazily-resolved module. Returns immediately;
    /// nothing is fetched until the first mount.
    #[must_use]
    pub fn load(&self, descriptor: RemoteAppConfig) -> LazyModule {
        LazyModule {
            descriptor,
            strategy: Arc::clone(&self.strategy),
            resolved: OnceCell::new(),
        }
    }
}

/// A remote module that resolves on first use.
pub struct LazyModule {
    descriptor: RemoteAppConfig,
    strategy: Arc<ResolutionStrategy>,
    resolved: OnceCell<Arc<dyn RemoteModule>>,
}

impl LazyModule {
    /// The descriptor this module was loaded from.
    #[must_use]
    pub fn descriptor(&self) -> &RemoteAppConfig {
        &self.descriptor
    }

    /// True once a resolution has succeeded.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    /// Resolve the module, caching success. A failed resolution is not
    /// cached: the next call resolves again.
    pub async fn resolve(&self) -> Result<Arc<dyn RemoteModule>, LoadError> {
        self.resolved
            .get_or_try_init(|| self.strategy.resolve(&self.descriptor))
            .await
            .map(Arc::clone)
    }

    /// Resolve (if needed) and mount.
    pub async fn mount(&self, ctx: &ModuleContext) -> Result<ModuleView, LoadError> {
        let module = self.resolve().await?;
        Ok(module.mount(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleError;
    use crate::providers::StaticModule;
    use async_trait::async_trait;
    use mosaic_state::SharedStateStore;
    use shared_bus::EventBus;
    use shared_types::SessionSnapshot;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn descriptor(fallback: FallbackBehavior) -> RemoteAppConfig {
        RemoteAppConfig {
            name: "shop".to_string(),
            url: "http://localhost:3002".to_string(),
            scope: "shop".to_string(),
            module: "/remote-entry.json".to_string(),
            fallback,
            timeout_ms: None,
            max_retries: None,
        }
    }

    fn context() -> ModuleContext {
        let bus = Arc::new(EventBus::new());
        let state = Arc::new(SharedStateStore::new(Arc::clone(&bus)));
        ModuleContext::new(bus, state, SessionSnapshot::loading())
    }

    /// Provider scripted to fail `failures` times, then succeed; counts
    /// every call.
    struct ScriptedProvider {
        failures: usize,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn failing(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModuleProvider for ScriptedProvider {
        async fn resolve(
            &self,
            descriptor: &RemoteAppConfig,
        ) -> Result<Arc<dyn RemoteModule>, LoadError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(LoadError::Fetch {
                    name: descriptor.name.clone(),
                    detail: "scripted failure".to_string(),
                })
            } else {
                Ok(Arc::new(StaticModule::new(
                    descriptor.name.clone(),
                    "resolved",
                )))
            }
        }
    }

    #[tokio::test]
    async fn primary_failure_falls_through_to_fallback() {
        let primary = Arc::new(ScriptedProvider::failing(usize::MAX));
        let fallback = Arc::new(ScriptedProvider::failing(0));
        let strategy = ResolutionStrategy::new(
            Arc::clone(&primary) as Arc<dyn ModuleProvider>,
            Arc::clone(&fallback) as Arc<dyn ModuleProvider>,
        );

        let module = strategy
            .resolve(&descriptor(FallbackBehavior::LocalRegistry))
            .await
            .unwrap();
        assert_eq!(module.name(), "shop");
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fail_behavior_skips_the_fallback() {
        let primary = Arc::new(ScriptedProvider::failing(usize::MAX));
        let fallback = Arc::new(ScriptedProvider::failing(0));
        let strategy = ResolutionStrategy::new(
            Arc::clone(&primary) as Arc<dyn ModuleProvider>,
            Arc::clone(&fallback) as Arc<dyn ModuleProvider>,
        );

        let err = strategy
            .resolve(&descriptor(FallbackBehavior::Fail))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Unresolvable { .. }));
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn both_paths_failing_is_unresolvable() {
        let strategy = ResolutionStrategy::new(
            Arc::new(ScriptedProvider::failing(usize::MAX)),
            Arc::new(ScriptedProvider::failing(usize::MAX)),
        );

        let err = strategy
            .resolve(&descriptor(FallbackBehavior::LocalRegistry))
            .await
            .err()
            .unwrap();
        match err {
            LoadError::Unresolvable { name, detail } => {
                assert_eq!(name, "shop");
                assert!(detail.contains("fallback"));
            }
            other => panic!("expected unresolvable, got {other}"),
        }
    }

    #[tokio::test]
    async fn lazy_module_caches_successful_resolution() {
        let primary = Arc::new(ScriptedProvider::failing(0));
        let strategy = Arc::new(ResolutionStrategy::new(
            Arc::clone(&primary) as Arc<dyn ModuleProvider>,
            Arc::new(ScriptedProvider::failing(usize::MAX)),
        ));
        let loader = ModuleLoader::new(strategy);
        let lazy = loader.load(descriptor(FallbackBehavior::LocalRegistry));

        assert!(!lazy.is_resolved());
        lazy.mount(&context()).await.unwrap();
        lazy.mount(&context()).await.unwrap();

        assert!(lazy.is_resolved());
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_resolution_is_retried_on_next_mount() {
        // Primary fails the first attempt, then succeeds.
        let primary = Arc::new(ScriptedProvider::failing(1));
        let strategy = Arc::new(ResolutionStrategy::new(
            Arc::clone(&primary) as Arc<dyn ModuleProvider>,
            Arc::new(ScriptedProvider::failing(usize::MAX)),
        ));
        let loader = ModuleLoader::new(strategy);
        let lazy = loader.load(descriptor(FallbackBehavior::Fail));

        assert!(lazy.mount(&context()).await.is_err());
        assert!(!lazy.is_resolved());

        let view = lazy.mount(&context()).await.unwrap();
        assert_eq!(view.body, "resolved");
    }

    #[tokio::test]
    async fn mount_error_of_resolved_module_surfaces_as_load_error() {
        struct Faulty;
        impl RemoteModule for Faulty {
            fn name(&self) -> &str {
                "faulty"
            }
            fn mount(&self, _ctx: &ModuleContext) -> Result<ModuleView, ModuleError> {
                Err(ModuleError::Mount {
                    name: "faulty".to_string(),
                    detail: "broken render".to_string(),
                })
            }
        }

        struct FaultyProvider;
        #[async_trait]
        impl ModuleProvider for FaultyProvider {
            async fn resolve(
                &self,
                _descriptor: &RemoteAppConfig,
            ) -> Result<Arc<dyn RemoteModule>, LoadError> {
                Ok(Arc::new(Faulty))
            }
        }

        let strategy = Arc::new(ResolutionStrategy::new(
            Arc::new(FaultyProvider),
            Arc::new(ScriptedProvider::failing(usize::MAX)),
        ));
        let lazy = ModuleLoader::new(strategy).load(descriptor(FallbackBehavior::Fail));

        let err = lazy.mount(&context()).await.err().unwrap();
        assert!(matches!(err, LoadError::Module(_)));
    }
}
