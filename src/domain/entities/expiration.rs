//! Expiration record keyed by alias.

use chrono::{DateTime, Utc};

/// Expiration timestamp for an alias.
///
/// Joined to [`super::Link`] by alias value only; no referential integrity is
/// enforced, so a record may exist without a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiration {
    pub alias: String,
    pub expire_at: DateTime<Utc>,
}

impl Expiration {
    pub fn new(alias: String, expire_at: DateTime<Utc>) -> Self {
        Self { alias, expire_at }
    }

    /// Returns true if `expire_at` is strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at < now
    }
}
