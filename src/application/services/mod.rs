//! Business logic services for the application layer.

pub mod account_service;
pub mod link_service;
pub mod redirect_service;

pub use account_service::{AccountService, RegisterInput};
pub use link_service::{CreateLinkInput, LinkService};
pub use redirect_service::{RedirectService, Resolution};
