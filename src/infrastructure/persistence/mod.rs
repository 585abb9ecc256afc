//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters for every query.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Credential store
//! - [`PgLinkRepository`] - Link store, transactional with expirations
//! - [`PgExpirationRepository`] - Expiration store keyed by alias

pub mod pg_expiration_repository;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_expiration_repository::PgExpirationRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
