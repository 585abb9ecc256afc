//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Credential store
//! - [`LinkRepository`] - Link store (writes expirations transactionally)
//! - [`ExpirationRepository`] - Expiration store lookups and reconciliation

pub mod expiration_repository;
pub mod link_repository;
pub mod user_repository;

pub use expiration_repository::ExpirationRepository;
pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use expiration_repository::MockExpirationRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
