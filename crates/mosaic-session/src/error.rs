//! Session error types.

use thiserror::Error;

/// Errors from sign-in and sign-up.
///
/// Only input validation fails loudly; persistence failures are logged and
/// absorbed (durability is best-effort).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Email or credential was empty.
    #[error("email and credential must not be empty")]
    MissingCredentials,

    /// The email did not look like an address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Sign-up requires a display name.
    #[error("display name must not be empty")]
    MissingDisplayName,
}
