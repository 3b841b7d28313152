//! # Session Manager
//!
//! Owns the authenticated-identity lifecycle: sign-in, sign-up, sign-out,
//! and restore of the persisted session at process start. Every transition
//! is broadcast on the `auth-change` topic so remote modules observe
//! identity changes without coupling to this crate.
//!
//! ## State Machine
//!
//! ```text
//! Unauthenticated ──sign_in/sign_up──→ Authenticated
//!        ↑                                   │
//!        └───────────── sign_out ────────────┘
//! ```
//!
//! The transient `Authenticating` state is observable only as the
//! `is_loading` flag of the snapshot.
//!
//! ## Durability
//!
//! Persistence is best-effort: storage failures are logged and never block
//! the in-memory transition; a corrupt persisted session is treated as
//! absence of identity.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod manager;
pub mod store;

pub use error::SessionError;
pub use manager::{SessionManager, USER_STORAGE_KEY};
pub use store::{InMemoryStore, JsonFileStore, SessionStore, StoreError};
