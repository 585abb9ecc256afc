//! Destination URL validation.
//!
//! Destinations are stored as entered (trimmed) so that redirects go exactly
//! where the owner asked. Only the scheme and overall syntax are checked.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a destination URL and returns its trimmed form.
///
/// # Rules
///
/// 1. **Non-empty** after trimming
/// 2. **Parsable** as an absolute URL
/// 3. **Protocol**: only `http` and `https` (rejects `javascript:`, `data:`, `file:`, ...)
/// 4. **Host**: must be present
///
/// # Errors
///
/// Returns the matching [`UrlValidationError`] variant.
pub fn validate_destination(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}
