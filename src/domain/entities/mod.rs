//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - An alias mapped to a destination URL
//! - [`Expiration`] - An expiration timestamp keyed by alias
//! - [`VerifiedAliases`] - Aliases unlocked by password in the current session
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewUser`, `NewLink`).

pub mod expiration;
pub mod link;
pub mod user;
pub mod verified_aliases;

pub use expiration::Expiration;
pub use link::{Link, LinkSummary, NewLink};
pub use user::{NewUser, User};
pub use verified_aliases::VerifiedAliases;
