//! Link creation, listing and deletion service.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Link, LinkSummary, NewLink, User};
use crate::domain::repositories::{ExpirationRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::alias::{generate_alias, validate_alias};
use crate::utils::expire_date::parse_expire_date;
use crate::utils::password::hash_password;
use crate::utils::url_validator::validate_destination;

/// Link creation form data after presence checks.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkInput {
    /// Requested alias; blank means "generate one".
    pub alias: String,
    pub url: String,
    /// Expiration date as `YYYY-MM-DD`; blank or `None` means no expiration.
    pub expire: Option<String>,
    /// Link password; blank or `None` means unprotected.
    pub password: Option<String>,
    pub dangerous: bool,
}

/// Service for managing a user's short links.
///
/// All input is validated before anything is written, and the link and its
/// expiration are persisted in a single repository call.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    expirations: Arc<dyn ExpirationRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>, expirations: Arc<dyn ExpirationRepository>) -> Self {
        Self { links, expirations }
    }

    /// Creates a link owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the alias, URL or expiration date
    /// is invalid.
    /// Returns [`AppError::Conflict`] with "Alias already exists." if the alias
    /// is taken.
    pub async fn create_link(&self, owner: &User, input: CreateLinkInput) -> Result<Link, AppError> {
        let original_url = validate_destination(&input.url).map_err(|e| {
            AppError::bad_request("Invalid URL.", json!({ "reason": e.to_string() }))
        })?;

        let expire_at = parse_expire_date(input.expire.as_deref())?;

        let requested = input.alias.trim();
        let alias = if requested.is_empty() {
            self.generate_unique_alias().await?
        } else {
            validate_alias(requested)?;

            if self.links.find_by_alias(requested).await?.is_some() {
                return Err(alias_taken(requested));
            }

            requested.to_string()
        };

        let password_hash = match input.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let new_link = NewLink {
            alias: alias.clone(),
            original_url,
            owner_id: owner.id,
            password_hash,
            is_dangerous: input.dangerous,
            expire_at,
        };

        let link = self.links.create(new_link).await.map_err(|e| match e {
            AppError::Conflict { .. } => alias_taken(&alias),
            other => other,
        })?;

        info!(
            alias = %link.alias,
            owner = %owner.username,
            protected = link.is_protected(),
            dangerous = link.is_dangerous,
            expires = ?expire_at,
            "Link created"
        );

        Ok(link)
    }

    /// Lists the owner's links joined with their expiration dates.
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<LinkSummary>, AppError> {
        let links = self.links.list_by_owner(owner_id).await?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let aliases: Vec<String> = links.iter().map(|l| l.alias.clone()).collect();
        let mut expirations: HashMap<String, _> = self
            .expirations
            .find_many(&aliases)
            .await?
            .into_iter()
            .map(|e| (e.alias, e.expire_at))
            .collect();

        Ok(links
            .into_iter()
            .map(|link| LinkSummary {
                expire_at: expirations.remove(&link.alias),
                link,
            })
            .collect())
    }

    /// Deletes the owner's link with the given alias.
    ///
    /// Returns `Ok(false)` without touching anything when the alias is unknown
    /// or belongs to another user.
    pub async fn delete_link(&self, owner: &User, alias: &str) -> Result<bool, AppError> {
        let deleted = self.links.delete_owned(alias, owner.id).await?;

        if deleted {
            info!(alias, owner = %owner.username, "Link deleted");
        }

        Ok(deleted)
    }

    /// Generates an alias not yet used by any link.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_alias(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let alias = generate_alias()?;

            if validate_alias(&alias).is_ok() && self.links.find_by_alias(&alias).await?.is_none() {
                return Ok(alias);
            }
        }

        Err(AppError::internal(
            "Failed to generate alias",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn alias_taken(alias: &str) -> AppError {
    AppError::conflict("Alias already exists.", json!({ "alias": alias }))
}
