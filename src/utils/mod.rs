//! Utility functions shared across layers.
//!
//! - [`alias`] - Alias generation and validation
//! - [`url_validator`] - Destination URL validation
//! - [`password`] - Argon2id password hashing
//! - [`expire_date`] - Expiration date parsing
//! - [`db_error`] - Database constraint inspection

pub mod alias;
pub mod db_error;
pub mod expire_date;
pub mod password;
pub mod url_validator;
