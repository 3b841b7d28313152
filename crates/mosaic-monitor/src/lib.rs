//! # Health & Performance Monitor
//!
//! Two independent observation loops:
//!
//! - **Liveness loop**: probes every configured remote target once at start
//!   and then on a fixed interval, overwriting one `HealthRecord` per
//!   target and publishing each on the `health` topic. Cancellable: the
//!   loop dies with its handle.
//! - **Performance sampler**: reads platform load/render timing and memory
//!   usage once per page-load completion and publishes a `performance`
//!   event. Not periodic.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod health;
pub mod performance;
pub mod probe;

pub use health::{HealthMonitor, HealthTarget, MonitorHandle, DEFAULT_PROBE_INTERVAL};
pub use performance::{PageTimings, PerformanceSampler, ProcessTimingSource, TimingSource};
pub use probe::{HttpProbe, LivenessProbe, ProbeError};
