//! Alias generation and validation utilities.
//!
//! Provides cryptographically secure random alias generation for links created
//! without an explicit alias, and validation for user-provided aliases.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const ALIAS_LENGTH_BYTES: usize = 6;

/// Maximum length of a user-provided alias.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Aliases that collide with application routes.
const RESERVED_ALIASES: &[&str] = &[
    "register",
    "login",
    "logout",
    "dashboard",
    "create",
    "delete",
    "static",
];

/// Generates a random URL-safe alias.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character alias.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_alias() -> Result<String, AppError> {
    let mut buffer = [0u8; ALIAS_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate alias",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!("Alias must be 1-{MAX_ALIAS_LENGTH} characters."),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens and underscores.",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved.",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
