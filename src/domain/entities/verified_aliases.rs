//! Session-scoped set of aliases unlocked by password.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aliases whose password has been supplied in the current browser session.
///
/// Entries are never pruned; a verified alias stays verified for the
/// lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiedAliases(HashSet<String>);

impl VerifiedAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.contains(alias)
    }

    /// Marks an alias as verified. Returns false if it already was.
    pub fn insert(&mut self, alias: impl Into<String>) -> bool {
        self.0.insert(alias.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
