//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, RedirectService};
use crate::domain::repositories::{ExpirationRepository, LinkRepository, UserRepository};

/// Services shared across requests.
///
/// Cloning is cheap; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Wires the services over the given stores.
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        expirations: Arc<dyn ExpirationRepository>,
    ) -> Self {
        Self {
            account_service: Arc::new(AccountService::new(users)),
            link_service: Arc::new(LinkService::new(links.clone(), expirations.clone())),
            redirect_service: Arc::new(RedirectService::new(links, expirations)),
        }
    }
}
