//! # Core Entities
//!
//! Identity and remote-module descriptors. Serialized field names follow the
//! cross-module wire contract, so every struct renames to `camelCase`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The authenticated user record.
///
/// Owned exclusively by the Session Manager: created on successful
/// authentication, destroyed on sign-out, persisted as JSON under a fixed
/// storage key. At most one identity is active per process; its absence
/// means the process is unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable unique id, generated at authentication time.
    pub id: String,
    /// The address the user authenticated with.
    pub email: String,
    /// Human-readable name shown by consuming modules.
    pub display_name: String,
    /// Reference to an avatar image, when one could be derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

/// Read-only view of the session, handed to remote modules.
///
/// Modules consume this snapshot (and listen for `auth-change` on the bus);
/// they never reach into the Session Manager's internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The active identity, if any.
    pub user: Option<Identity>,
    /// True when `user` is present.
    pub is_authenticated: bool,
    /// True while a restore or sign-in/sign-up is in flight.
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Snapshot of a process that has not yet restored its session.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

/// What the loader does when the primary (network) resolution fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackBehavior {
    /// Resolve a locally registered stand-in module by name.
    #[default]
    LocalRegistry,
    /// Fail without a fallback attempt.
    Fail,
}

/// Descriptor for one named remote module.
///
/// Immutable once resolved from configuration; descriptors are looked up by
/// name and never duplicated. `timeout_ms` and `max_retries` are enforced by
/// the network transport adapter, not by the loader itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAppConfig {
    /// Unique remote name (also the fallback-registry key).
    pub name: String,
    /// Base URL the remote is served from.
    pub url: String,
    /// Federation scope the remote registers under.
    pub scope: String,
    /// Entry path appended to `url` to fetch the remote's manifest.
    pub module: String,
    /// Fallback behavior when the primary resolution fails.
    #[serde(default)]
    pub fallback: FallbackBehavior,
    /// Per-attempt fetch timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Additional fetch attempts after the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl RemoteAppConfig {
    /// Full URL of the remote's entry manifest.
    #[must_use]
    pub fn entry_url(&self) -> String {
        format!("{}{}", self.url, self.module)
    }
}

/// The JSON document a remote's entry URL serves.
///
/// A manifest whose `name` does not match the descriptor it was fetched for
/// counts as a malformed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntryManifest {
    /// Remote name; must match the descriptor's.
    pub name: String,
    /// Version the remote was built as.
    #[serde(default)]
    pub version: String,
    /// Build timestamp, as reported by the remote's build.
    #[serde(default)]
    pub build_time: String,
    /// Shared dependencies the remote was built against.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}
