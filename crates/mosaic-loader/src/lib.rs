//! # Remote Module Loader
//!
//! Resolves named remote-module descriptors into mountable modules.
//!
//! ## Resolution
//!
//! ```text
//! load(descriptor) ──→ LazyModule
//!                          │ first mount
//!                          ▼
//!                  ResolutionStrategy
//!                    │           │
//!              RemoteProvider    │ on failure
//!              (network fetch)   ▼
//!                         LocalFallbackProvider
//!                         (in-process registry)
//! ```
//!
//! The loader performs no retry of its own; `timeout_ms`/`max_retries` on
//! the descriptor are enforced by the network transport adapter
//! (`RemoteProvider`). When both paths fail, the lazy module's mount
//! returns the load failure. Raw failures never reach the host shell; the
//! isolation boundary wrapping the module catches them.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod loader;
pub mod module;
pub mod providers;

pub use error::LoadError;
pub use loader::{LazyModule, ModuleLoader, ResolutionStrategy};
pub use module::{ModuleContext, ModuleError, ModuleView, RemoteModule};
pub use providers::{LocalFallbackProvider, ModuleProvider, RemoteProvider, StaticModule};
