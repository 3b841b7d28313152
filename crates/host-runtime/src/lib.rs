//! # Mosaic Host Runtime
//!
//! The long-lived shell process that boots the shared providers and
//! composes remote modules.
//!
//! ## Modular Structure
//!
//! - `container/` - Host configuration and provider wiring
//! - `registry/` - One isolation boundary per configured remote
//! - `wiring/` - Host-level diagnostic subscriptions
//! - `telemetry` - Log subscriber setup
//!
//! ## Startup Sequence
//!
//! 1. Initialize the log subscriber
//! 2. Validate configuration
//! 3. Build the container (bus → session → store → router → loader)
//! 4. Wire diagnostics
//! 5. Restore the persisted session
//! 6. Start the health monitor
//! 7. Mount the configured remotes through their boundaries

pub mod container;
pub mod registry;
pub mod telemetry;
pub mod wiring;

pub use container::{ConfigError, HostConfig, HostContainer};
pub use registry::{RegistryError, RemoteRegistry};
