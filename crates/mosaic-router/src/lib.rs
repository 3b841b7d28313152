//! # Navigation Bridge
//!
//! Wraps the host's navigation primitive behind a port and broadcasts every
//! route transition on the `navigation` topic, so remote modules can react
//! without coupling to the host's router implementation.
//!
//! Ordering guarantee: the broadcast always happens **after** the primitive
//! has been invoked, so a listener observing the event may assume the
//! transition is in flight.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod bridge;
pub mod navigator;

pub use bridge::RouterBridge;
pub use navigator::{HistoryNavigator, Navigator};
