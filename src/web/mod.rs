//! Web presentation layer.
//!
//! Server-rendered pages for accounts, link management and short link
//! visits. Uses Askama templates, `tower-sessions` for the session user and
//! flash messages.
//!
//! # Modules
//!
//! - [`handlers`] - Page and form handlers
//! - [`middleware`] - Login guard, HTML decoration, rate limiting, tracing
//! - [`routes`] - Route groups
//! - [`session`] - Session keys and signing key derivation
//! - [`flash`] - One-shot messages
//! - [`forms`] - Posted form payloads

pub mod flash;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
