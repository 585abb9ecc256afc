//! Session keys and helpers for the logged-in user and unlocked aliases.

use sha2::{Digest, Sha512};
use tower_sessions::Session;
use tower_sessions::cookie::Key;

use crate::domain::entities::VerifiedAliases;
use crate::error::AppError;

/// Session key holding the authenticated username.
pub const USER_KEY: &str = "user";

/// Session key holding the [`VerifiedAliases`] set.
pub const VERIFIED_KEY: &str = "authenticated_links";

/// Derives the 64-byte cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Records `username` as the session user under a fresh session id.
pub async fn log_in(session: &Session, username: &str) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(USER_KEY, username).await?;
    Ok(())
}

/// Drops every session value, verified aliases included, and rotates the id.
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.clear().await;
    session.cycle_id().await?;
    Ok(())
}

pub async fn current_username(session: &Session) -> Result<Option<String>, AppError> {
    Ok(session.get::<String>(USER_KEY).await?)
}

pub async fn verified_aliases(session: &Session) -> Result<VerifiedAliases, AppError> {
    Ok(session
        .get::<VerifiedAliases>(VERIFIED_KEY)
        .await?
        .unwrap_or_default())
}

pub async fn store_verified_aliases(
    session: &Session,
    verified: &VerifiedAliases,
) -> Result<(), AppError> {
    session.insert(VERIFIED_KEY, verified).await?;
    Ok(())
}
