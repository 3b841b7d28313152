//! # Liveness Loop
//!
//! Probes every configured target once immediately and then on a fixed
//! interval. Each cycle overwrites the prior record per target (no history
//! is retained) and publishes the fresh record on the bus.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::RwLock;
use shared_bus::{EventBus, HostEvent};
use shared_types::{HealthRecord, HealthStatus};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::probe::LivenessProbe;

/// Probe cadence when none is configured.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// One monitored remote target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthTarget {
    /// Display name (the remote's configured name).
    pub name: String,
    /// Base URL the probe runs against.
    pub url: String,
}

type RecordMap = Arc<RwLock<HashMap<String, HealthRecord>>>;

/// Periodic liveness monitor over a fixed target set.
pub struct HealthMonitor {
    targets: Vec<HealthTarget>,
    probe: Arc<dyn LivenessProbe>,
    bus: Arc<EventBus>,
    interval: Duration,
    records: RecordMap,
}

impl HealthMonitor {
    /// Create a monitor probing `targets` via `probe`, publishing on `bus`.
    #[must_use]
    pub fn new(
        targets: Vec<HealthTarget>,
        probe: Arc<dyn LivenessProbe>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            targets,
            probe,
            bus,
            interval: DEFAULT_PROBE_INTERVAL,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Override the probe cadence.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one probe cycle over every target, overwriting each record and
    /// publishing it.
    pub async fn run_cycle(&self) {
        for target in &self.targets {
            let started = Instant::now();
            let outcome = self.probe.check(&target.url).await;
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            let record = match outcome {
                Ok(()) => HealthRecord {
                    target: target.name.clone(),
                    status: HealthStatus::Healthy,
                    latency_ms,
                    observed_at: Utc::now(),
                    error_detail: None,
                },
                Err(e) => {
                    warn!(target = %target.name, error = %e, "liveness probe failed");
                    HealthRecord {
                        target: target.name.clone(),
                        status: HealthStatus::Down,
                        latency_ms,
                        observed_at: Utc::now(),
                        error_detail: Some(e.to_string()),
                    }
                }
            };

            debug!(target = %target.name, status = ?record.status, latency_ms, "probe completed");
            self.records
                .write()
                .insert(target.name.clone(), record.clone());
            self.bus.publish(HostEvent::HealthChanged(record));
        }
    }

    /// Spawn the probe loop. The first cycle runs immediately.
    ///
    /// The loop lives until the returned handle is stopped or dropped.
    #[must_use]
    pub fn start(self) -> MonitorHandle {
        let records = Arc::clone(&self.records);
        info!(
            targets = self.targets.len(),
            interval_secs = self.interval.as_secs(),
            "health monitor started"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.run_cycle().await;
            }
        });

        MonitorHandle { task, records }
    }
}

/// Handle owning the running liveness loop.
///
/// Dropping the handle tears the loop down, matching the monitor's mount
/// lifetime.
pub struct MonitorHandle {
    task: JoinHandle<()>,
    records: RecordMap,
}

impl MonitorHandle {
    /// The latest record per target, sorted by target name.
    #[must_use]
    pub fn statuses(&self) -> Vec<HealthRecord> {
        let mut records: Vec<HealthRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| a.target.cmp(&b.target));
        records
    }

    /// The latest record for one target.
    #[must_use]
    pub fn record(&self, target: &str) -> Option<HealthRecord> {
        self.records.read().get(target).cloned()
    }

    /// Stop the probe loop now.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.task.abort();
        info!("health monitor stopped");
    }
}
