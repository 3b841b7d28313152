//! # Liveness Probe Port
//!
//! A lightweight reachability check against one target. The HTTP adapter
//! issues `HEAD {target}/health`; tests substitute scripted probes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Probe failure classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request never completed (connect failure, timeout).
    #[error("probe transport failure: {0}")]
    Transport(String),

    /// The target answered with a non-success status.
    #[error("unhealthy response status: {0}")]
    Status(u16),
}

/// Reachability check against a target's health endpoint.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Probe `target_url`; `Ok` means the target is live.
    async fn check(&self, target_url: &str) -> Result<(), ProbeError>;
}

/// Default probe timeout beyond the transport default.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP `HEAD {target}/health` probe.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a probe with its own HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivenessProbe for HttpProbe {
    async fn check(&self, target_url: &str) -> Result<(), ProbeError> {
        let response = self
            .client
            .head(format!("{target_url}/health"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(response.status().as_u16()))
        }
    }
}
