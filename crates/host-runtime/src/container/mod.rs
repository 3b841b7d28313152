//! # Host Container
//!
//! Central container holding the shared providers with proper lifetime
//! management and explicit dependency injection: every component receives
//! the bus (and its other dependencies) at construction, so a missing
//! dependency is a construction-time error, never a runtime throw deep in a
//! call tree.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, HostConfig};
pub use subsystems::HostContainer;
