//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Link writes also maintain the alias' expiration record so that a link and
/// its expiration are never left half-written.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link together with its optional expiration record.
    ///
    /// When `new_link.expire_at` is `None`, any stale expiration record left
    /// for the alias is removed in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by a user, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes a link if, and only if, it is owned by `owner_id`.
    ///
    /// The alias' expiration record is deleted in the same transaction. Returns
    /// `Ok(false)` and deletes nothing when the alias is unknown or owned by
    /// someone else.
    async fn delete_owned(&self, alias: &str, owner_id: i64) -> Result<bool, AppError>;
}
