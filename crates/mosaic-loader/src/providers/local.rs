//! # Local Fallback Provider
//!
//! In-process registry of stand-in modules, keyed by remote name. Used when
//! the network path fails and the descriptor allows falling back.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::RemoteAppConfig;
use tracing::debug;

use crate::error::LoadError;
use crate::module::{ModuleContext, ModuleError, ModuleView, RemoteModule};
use crate::providers::ModuleProvider;

/// Registry of locally built modules, resolved by descriptor name.
#[derive(Default)]
pub struct LocalFallbackProvider {
    registry: RwLock<HashMap<String, Arc<dyn RemoteModule>>>,
}

impl LocalFallbackProvider {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stand-in under its own name, replacing any previous one.
    pub fn register(&self, module: Arc<dyn RemoteModule>) {
        let name = module.name().to_string();
        debug!(module = %name, "local fallback registered");
        self.registry.write().insert(name, module);
    }

    /// Names with a registered stand-in.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ModuleProvider for LocalFallbackProvider {
    async fn resolve(
        &self,
        descriptor: &RemoteAppConfig,
    ) -> Result<Arc<dyn RemoteModule>, LoadError> {
        self.registry
            .read()
            .get(&descriptor.name)
            .cloned()
            .ok_or_else(|| LoadError::FallbackMissing(descriptor.name.clone()))
    }
}

/// A fixed-content module, useful as a local stand-in and as a test
/// fixture.
pub struct StaticModule {
    name: String,
    body: String,
}

impl StaticModule {
    /// Create a module rendering `body` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl RemoteModule for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn mount(&self, _ctx: &ModuleContext) -> Result<ModuleView, ModuleError> {
        Ok(ModuleView {
            module: self.name.clone(),
            body: self.body.clone(),
        })
    }
}
