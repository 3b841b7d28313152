//! # Shared Types
//!
//! Entities shared by every Mosaic subsystem. The host, the loader, the
//! monitor, and the remote modules themselves all communicate in terms of
//! these types, so their serialized form is part of the cross-module
//! contract and must stay stable.
//!
//! ## Contents
//!
//! - `entities`: identity, session snapshot, remote descriptors and manifests
//! - `health`: liveness classification and per-target records
//! - `metrics`: page load/render/memory measurements
//! - `validation`: input checks shared by the session layer and config

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod health;
pub mod metrics;
pub mod validation;

pub use entities::{
    FallbackBehavior, Identity, RemoteAppConfig, RemoteEntryManifest, SessionSnapshot,
};
pub use health::{HealthRecord, HealthStatus};
pub use metrics::PerformanceMetrics;
