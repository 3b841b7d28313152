//! # Module Providers
//!
//! The polymorphic "module provider" capability. Exactly two variants
//! exist, network-resolved and local-fallback, and the resolution strategy
//! selects between them; nothing else resolves modules.

pub mod local;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::RemoteAppConfig;

use crate::error::LoadError;
use crate::module::RemoteModule;

pub use local::{LocalFallbackProvider, StaticModule};
pub use remote::RemoteProvider;

/// Resolves a descriptor into executable module code.
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    /// Resolve `descriptor` into a mountable module.
    async fn resolve(
        &self,
        descriptor: &RemoteAppConfig,
    ) -> Result<Arc<dyn RemoteModule>, LoadError>;
}
