//! Input validation helpers.
//!
//! Used by the session layer for credentials and by the host configuration
//! for remote URLs.

use url::Url;

/// Minimal email shape check: one `@` with non-empty local part and a domain
/// containing a dot.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
}

/// True when the value parses as an absolute URL.
#[must_use]
pub fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// True when the value is non-empty after trimming.
#[must_use]
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value has at least `min` characters.
#[must_use]
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// True when the value has at most `max` characters.
#[must_use]
pub fn has_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}
