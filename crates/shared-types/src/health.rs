//! # Health Records
//!
//! Liveness classification for monitored remote targets. One record exists
//! per target and is overwritten on every probe cycle; no history is kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness classification of a probed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The probe completed successfully.
    Healthy,
    /// Reachable but impaired. Part of the status contract; the default
    /// classifier never produces it.
    Degraded,
    /// The probe failed or the target was unreachable.
    Down,
}

/// Outcome of the most recent probe of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// The monitored target's name.
    pub target: String,
    /// Liveness classification.
    pub status: HealthStatus,
    /// Round-trip latency of the probe.
    pub latency_ms: u64,
    /// When the probe completed.
    pub observed_at: DateTime<Utc>,
    /// Failure description; populated whenever `status` is `Down`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl HealthRecord {
    /// True unless the target is down.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.status != HealthStatus::Down
    }
}
