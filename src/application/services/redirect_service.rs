//! Alias resolution for visitors.
//!
//! Decides what a visitor of `/{alias}` gets. Checks run in a fixed order:
//!
//! 1. unknown alias → [`Resolution::NotFound`]
//! 2. expiration strictly in the past → [`Resolution::Expired`]
//! 3. password set and alias not verified in this session →
//!    [`Resolution::PasswordRequired`] / [`Resolution::PasswordIncorrect`],
//!    or continue after a correct password
//! 4. dangerous flag → [`Resolution::Warning`]
//! 5. otherwise → [`Resolution::Redirect`]
//!
//! Expiration comes first so an expired link never reveals whether it was
//! protected. The warning comes after the password so the password still
//! gates it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::VerifiedAliases;
use crate::domain::repositories::{ExpirationRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;

/// Outcome of resolving an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No link with this alias exists.
    NotFound,
    /// The alias' expiration has passed.
    Expired,
    /// The link is password protected and no password was submitted.
    PasswordRequired,
    /// A password was submitted and did not match.
    PasswordIncorrect,
    /// The link is flagged dangerous; show an interstitial with the destination.
    Warning { url: String },
    /// Send the visitor to the destination.
    Redirect { url: String },
}

/// Service composing the link and expiration stores to resolve aliases.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    expirations: Arc<dyn ExpirationRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(links: Arc<dyn LinkRepository>, expirations: Arc<dyn ExpirationRepository>) -> Self {
        Self { links, expirations }
    }

    /// Resolves an alias at the current time.
    ///
    /// See [`Self::resolve_at`].
    pub async fn resolve(
        &self,
        alias: &str,
        submitted_password: Option<&str>,
        verified: &mut VerifiedAliases,
    ) -> Result<Resolution, AppError> {
        self.resolve_at(alias, submitted_password, verified, Utc::now())
            .await
    }

    /// Resolves an alias as of `now`.
    ///
    /// `verified` is the session's set of unlocked aliases. It is only
    /// modified when a submitted password is correct.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors or if the stored
    /// password hash is unreadable.
    pub async fn resolve_at(
        &self,
        alias: &str,
        submitted_password: Option<&str>,
        verified: &mut VerifiedAliases,
        now: DateTime<Utc>,
    ) -> Result<Resolution, AppError> {
        let Some(link) = self.links.find_by_alias(alias).await? else {
            debug!(alias, "Alias not found");
            return Ok(Resolution::NotFound);
        };

        if let Some(expiration) = self.expirations.find(alias).await?
            && expiration.is_expired_at(now)
        {
            debug!(alias, expire_at = %expiration.expire_at, "Alias expired");
            return Ok(Resolution::Expired);
        }

        if let Some(hash) = link.password_hash.as_deref()
            && !verified.contains(alias)
        {
            let Some(password) = submitted_password else {
                return Ok(Resolution::PasswordRequired);
            };

            if !verify_password(password, hash)? {
                info!(alias, "Incorrect link password");
                return Ok(Resolution::PasswordIncorrect);
            }

            verified.insert(alias);
            debug!(alias, "Alias unlocked for session");
        }

        if link.is_dangerous {
            return Ok(Resolution::Warning {
                url: link.original_url,
            });
        }

        Ok(Resolution::Redirect {
            url: link.original_url,
        })
    }
}
