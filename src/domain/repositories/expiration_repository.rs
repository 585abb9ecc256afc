//! Repository trait for the alias expiration store.

use crate::domain::entities::Expiration;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for expiration records keyed by alias.
///
/// Records are written through [`super::LinkRepository`]; this trait covers
/// lookups and reconciliation of orphaned records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpirationRepository: Send + Sync {
    /// Finds the expiration record for an alias.
    async fn find(&self, alias: &str) -> Result<Option<Expiration>, AppError>;

    /// Finds expiration records for a batch of aliases.
    ///
    /// Aliases without a record are simply absent from the result.
    async fn find_many(&self, aliases: &[String]) -> Result<Vec<Expiration>, AppError>;

    /// Deletes expiration records whose alias has no link.
    ///
    /// Returns the number of records removed.
    async fn prune_orphans(&self) -> Result<u64, AppError>;
}
