//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and business rules, and
//! expose a clean API to the web handlers.
//!
//! # Available Services
//!
//! - [`services::account_service::AccountService`] - Registration and login
//! - [`services::link_service::LinkService`] - Link creation, listing and deletion
//! - [`services::redirect_service::RedirectService`] - Alias resolution for visitors

pub mod services;
