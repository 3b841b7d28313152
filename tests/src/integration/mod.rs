//! Cross-subsystem integration flows.

pub mod composition;
pub mod fault_isolation;
pub mod health_cycle;
pub mod session_flow;
