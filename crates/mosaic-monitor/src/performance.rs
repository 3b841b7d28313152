//! # Performance Sampler
//!
//! Reads platform load/render timing and memory usage once per page-load
//! completion and publishes a `performance` event. Fields the platform
//! cannot supply are zero.

use std::sync::Arc;
use std::time::Instant;

use shared_bus::{EventBus, HostEvent};
use shared_types::PerformanceMetrics;
use tracing::debug;

/// Raw timing of one page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTimings {
    /// Fetch start to load completion.
    pub load_time_ms: u64,
    /// Fetch start to content rendered.
    pub render_time_ms: u64,
    /// Bytes transferred for the page.
    pub transfer_size_bytes: u64,
}

/// Platform source of load timing and memory usage.
///
/// Either accessor may yield `None` on platforms without the capability;
/// the sampler turns absence into zeroed fields.
pub trait TimingSource: Send + Sync {
    /// Timing of the most recent page load.
    fn page_timings(&self) -> Option<PageTimings>;

    /// Resident memory in use.
    fn memory_usage_bytes(&self) -> Option<u64>;
}

/// Timing source for a standalone host process: load time is measured from
/// process boot, and memory comes from the OS where available.
pub struct ProcessTimingSource {
    booted: Instant,
}

impl ProcessTimingSource {
    /// Create a source anchored at the current instant. Construct this at
    /// boot so `page_timings` measures boot-to-sample.
    #[must_use]
    pub fn new() -> Self {
        Self {
            booted: Instant::now(),
        }
    }
}

impl Default for ProcessTimingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSource for ProcessTimingSource {
    fn page_timings(&self) -> Option<PageTimings> {
        let elapsed_ms = u64::try_from(self.booted.elapsed().as_millis()).unwrap_or(u64::MAX);
        Some(PageTimings {
            load_time_ms: elapsed_ms,
            render_time_ms: elapsed_ms,
            // No transfer measurement for an in-process host.
            transfer_size_bytes: 0,
        })
    }

    fn memory_usage_bytes(&self) -> Option<u64> {
        resident_memory_bytes()
    }
}

/// Resident set size from `/proc/self/statm`, where the platform has it.
#[cfg(target_os = "linux")]
fn resident_memory_bytes() -> Option<u64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let resident_pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(resident_pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_bytes() -> Option<u64> {
    None
}

/// One-shot sampler publishing `performance` events.
pub struct PerformanceSampler {
    source: Arc<dyn TimingSource>,
    bus: Arc<EventBus>,
}

impl PerformanceSampler {
    /// Create a sampler reading from `source` and publishing on `bus`.
    #[must_use]
    pub fn new(source: Arc<dyn TimingSource>, bus: Arc<EventBus>) -> Self {
        Self { source, bus }
    }

    /// Sample the current page load for `app_name` and publish the result.
    ///
    /// Call once per page-load completion; the sampler is not periodic.
    pub fn sample(&self, app_name: &str) -> PerformanceMetrics {
        let timings = self.source.page_timings().unwrap_or_default();
        let metrics = PerformanceMetrics {
            load_time_ms: timings.load_time_ms,
            render_time_ms: timings.render_time_ms,
            transfer_size_bytes: timings.transfer_size_bytes,
            memory_usage_bytes: self.source.memory_usage_bytes().unwrap_or(0),
        };

        debug!(app = app_name, ?metrics, "page performance sampled");
        self.bus.publish(HostEvent::PerformanceSampled {
            app_name: app_name.to_string(),
            metrics,
        });
        metrics
    }
}
