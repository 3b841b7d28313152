//! # Host Configuration
//!
//! Unified configuration for the host shell. Supplied once at process start
//! and treated as immutable for the process lifetime.

use std::collections::BTreeMap;
use std::path::PathBuf;

use shared_types::{FallbackBehavior, RemoteAppConfig};
use thiserror::Error;
use url::Url;

/// Complete host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Remote modules by name.
    pub remotes: BTreeMap<String, RemoteAppConfig>,
    /// Health/performance monitoring configuration.
    pub monitoring: MonitoringConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Local storage configuration.
    pub storage: StorageConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        let mut remotes = BTreeMap::new();
        for (name, port) in [("dashboard", 3001), ("shop", 3002), ("blog", 3003)] {
            remotes.insert(
                name.to_string(),
                RemoteAppConfig {
                    name: name.to_string(),
                    url: format!("http://localhost:{port}"),
                    scope: name.to_string(),
                    module: "/remote-entry.json".to_string(),
                    fallback: FallbackBehavior::LocalRegistry,
                    timeout_ms: Some(5000),
                    max_retries: Some(3),
                },
            );
        }

        Self {
            remotes,
            monitoring: MonitoringConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl HostConfig {
    /// Validate the configuration.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - a remote has an empty name, or its map key differs from its name
    /// - a remote's base URL does not parse
    /// - monitoring is enabled with a zero probe interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, remote) in &self.remotes {
            if remote.name.trim().is_empty() {
                return Err(ConfigError::EmptyRemoteName);
            }
            if key != &remote.name {
                return Err(ConfigError::KeyMismatch {
                    key: key.clone(),
                    name: remote.name.clone(),
                });
            }
            if let Err(e) = Url::parse(&remote.url) {
                return Err(ConfigError::InvalidUrl {
                    name: remote.name.clone(),
                    detail: e.to_string(),
                });
            }
        }

        if self.monitoring.enabled && self.monitoring.probe_interval_secs == 0 {
            return Err(ConfigError::InvalidProbeInterval);
        }

        Ok(())
    }
}

/// Configuration errors. Configuration faults are wiring defects, so they
/// fail loudly at boot rather than degrading at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A remote was configured without a name.
    #[error("remote configured with an empty name")]
    EmptyRemoteName,

    /// A remote's map key differs from its descriptor name.
    #[error("remote key `{key}` does not match descriptor name `{name}`")]
    KeyMismatch {
        /// The map key.
        key: String,
        /// The descriptor's name field.
        name: String,
    },

    /// A remote's base URL does not parse.
    #[error("remote `{name}` has an invalid url: {detail}")]
    InvalidUrl {
        /// The remote's name.
        name: String,
        /// Parser diagnostic.
        detail: String,
    },

    /// Monitoring enabled with a zero interval.
    #[error("monitoring probe interval must be at least one second")]
    InvalidProbeInterval,
}

/// Health/performance monitoring configuration.
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    /// Run the liveness loop.
    pub enabled: bool,
    /// Seconds between probe cycles.
    pub probe_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probe_interval_secs: 30,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Authentication provider name.
    pub provider: String,
    /// Session lifetime hint for the provider.
    pub session_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: "custom".to_string(),
            session_timeout_ms: 3_600_000, // 1 hour
        }
    }
}

/// Local storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory persisted state lives under.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}
