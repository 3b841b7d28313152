//! # Mosaic Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── composition.rs      # Container boot, mounting, cross-module state
//!     ├── session_flow.rs     # Identity lifecycle end to end
//!     ├── fault_isolation.rs  # Boundary containment and recovery
//!     └── health_cycle.rs     # Liveness loop over mixed targets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mosaic-tests
//! cargo test -p mosaic-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
