//! # Remote Provider
//!
//! Network resolution of remote entries. This is the transport layer, so it
//! is where the descriptor's declared `timeout_ms` (per-attempt request
//! timeout) and `max_retries` (additional attempts after the first) are
//! enforced; the loader above stays retry-free.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared_types::{RemoteAppConfig, RemoteEntryManifest};
use tracing::debug;

use crate::error::LoadError;
use crate::module::{ManifestModule, RemoteModule};
use crate::providers::ModuleProvider;

/// Per-attempt fetch timeout when the descriptor declares none.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Fetches `{url}{module}` expecting a remote-entry manifest.
pub struct RemoteProvider {
    client: reqwest::Client,
}

impl RemoteProvider {
    /// Create a provider with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider reusing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_manifest(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<RemoteEntryManifest, String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let response = response.error_for_status().map_err(|e| e.to_string())?;
        response
            .json::<RemoteEntryManifest>()
            .await
            .map_err(|e| format!("invalid manifest: {e}"))
    }
}

impl Default for RemoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModuleProvider for RemoteProvider {
    async fn resolve(
        &self,
        descriptor: &RemoteAppConfig,
    ) -> Result<Arc<dyn RemoteModule>, LoadError> {
        let entry_url = descriptor.entry_url();
        let timeout =
            Duration::from_millis(descriptor.timeout_ms.unwrap_or(DEFAULT_FETCH_TIMEOUT_MS));
        let attempts = descriptor.max_retries.unwrap_or(0).saturating_add(1);

        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.fetch_manifest(&entry_url, timeout).await {
                Ok(manifest) => {
                    if manifest.name != descriptor.name {
                        // A mis-named manifest will not fix itself on retry.
                        return Err(LoadError::Malformed {
                            name: descriptor.name.clone(),
                            detail: format!("manifest names `{}`", manifest.name),
                        });
                    }
                    debug!(module = %descriptor.name, attempt, "remote entry fetched");
                    return Ok(Arc::new(ManifestModule::new(manifest)));
                }
                Err(detail) => {
                    debug!(
                        module = %descriptor.name,
                        attempt,
                        error = %detail,
                        "remote entry fetch attempt failed"
                    );
                    last_error = detail;
                }
            }
        }

        Err(LoadError::Fetch {
            name: descriptor.name.clone(),
            detail: last_error,
        })
    }
}
