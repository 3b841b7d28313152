//! Loader error types.

use thiserror::Error;

use crate::module::ModuleError;

/// Failure while resolving or mounting a remote module.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The remote entry could not be fetched.
    #[error("remote entry fetch failed for `{name}`: {detail}")]
    Fetch {
        /// The remote's name.
        name: String,
        /// Transport failure description.
        detail: String,
    },

    /// The remote entry was fetched but is not a usable manifest.
    #[error("remote entry for `{name}` is malformed: {detail}")]
    Malformed {
        /// The remote's name.
        name: String,
        /// What made the manifest unusable.
        detail: String,
    },

    /// No local stand-in is registered for the remote.
    #[error("no local fallback registered for `{0}`")]
    FallbackMissing(String),

    /// Both the primary and fallback paths failed.
    #[error("remote module `{name}` could not be resolved: {detail}")]
    Unresolvable {
        /// The remote's name.
        name: String,
        /// Combined failure description.
        detail: String,
    },

    /// The resolved module failed while mounting.
    #[error(transparent)]
    Module(#[from] ModuleError),
}
