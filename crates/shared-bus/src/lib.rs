//! # Shared Bus - Broadcast Channel for Cross-Module Coordination
//!
//! The only channel through which independently loaded modules coordinate.
//! Every other subsystem publishes its state transitions here; any number of
//! listeners (host-level or inside remote modules) observe them.
//!
//! ## Delivery Contract
//!
//! - `publish` delivers **synchronously**, to every listener registered at
//!   publish time, in registration order.
//! - A listener panic is contained and logged; later listeners still run.
//! - No buffering: a listener registered after a publish never observes it.
//! - Each delivery pass runs on a snapshot of the registration list, so
//!   unsubscribing mid-pass does not affect that pass, and a listener may
//!   publish from inside its callback without deadlocking.
//!
//! ## Contract Versioning
//!
//! Topics and payload shapes are consumed by independently built and
//! deployed modules. They are a versioned external contract, not an
//! implementation detail; see `events`.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod events;
pub mod subscription;

// Re-export main types
pub use bus::EventBus;
pub use events::{AuthTransition, EventFilter, EventTopic, HostEvent, NavigationKind};
pub use subscription::SubscriberGuard;

/// Current protocol version for bus payloads.
pub const PROTOCOL_VERSION: u16 = 1;
