//! Page performance measurements published on the `performance` topic.

use serde::{Deserialize, Serialize};

/// Load/render timing and memory usage of one page load.
///
/// Fields the platform cannot supply are zero rather than absent, so
/// consumers never need to branch on presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Time from fetch start to load completion.
    pub load_time_ms: u64,
    /// Time from fetch start to content rendered.
    pub render_time_ms: u64,
    /// Bytes transferred for the page.
    pub transfer_size_bytes: u64,
    /// Resident memory in use after load.
    pub memory_usage_bytes: u64,
}
