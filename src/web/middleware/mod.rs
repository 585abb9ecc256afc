//! Web-specific middleware.
//!
//! - [`require_login`] - Session guard for account pages
//! - [`html_snippet`] - Optional markup injection into HTML responses
//! - [`rate_limit`] - Per-IP throttling of credential endpoints
//! - [`tracing`] - Request/response logging

pub mod html_snippet;
pub mod rate_limit;
pub mod require_login;
pub mod tracing;
