//! Link entity representing an alias mapped to a destination URL.

use chrono::{DateTime, Utc};

/// A short link owned by a user.
///
/// Password protection and the danger flag are independent, optional overlays.
/// Expiration is stored separately, see [`super::Expiration`].
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    pub original_url: String,
    pub owner_id: i64,
    pub password_hash: Option<String>,
    pub is_dangerous: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        alias: String,
        original_url: String,
        owner_id: i64,
        password_hash: Option<String>,
        is_dangerous: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            alias,
            original_url,
            owner_id,
            password_hash,
            is_dangerous,
            created_at,
        }
    }

    /// Returns true if visitors must supply a password before being redirected.
    pub fn is_protected(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Input data for creating a new link.
///
/// `expire_at` is written to the expiration store in the same transaction as
/// the link itself.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub alias: String,
    pub original_url: String,
    pub owner_id: i64,
    pub password_hash: Option<String>,
    pub is_dangerous: bool,
    pub expire_at: Option<DateTime<Utc>>,
}

/// A link joined with its expiration, as listed on the dashboard.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub link: Link,
    pub expire_at: Option<DateTime<Utc>>,
}
