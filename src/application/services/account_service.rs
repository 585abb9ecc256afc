//! Account registration and login service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Registration form data after presence checks.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub accepted_terms: bool,
}

/// Service for creating accounts and checking credentials.
///
/// Passwords are hashed with Argon2id before storage and never logged.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new account.
    ///
    /// Checks run in this order: terms accepted, passwords match, username free.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the terms were not accepted or the
    /// passwords differ.
    /// Returns [`AppError::Conflict`] if the username is taken, including when
    /// a concurrent registration wins the race at insert time.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        if !input.accepted_terms {
            return Err(AppError::bad_request(
                "You must accept the privacy policy.",
                json!({ "field": "agree" }),
            ));
        }

        if input.password != input.confirm_password {
            return Err(AppError::bad_request(
                "Passwords do not match.",
                json!({ "field": "confirm_password" }),
            ));
        }

        if self
            .users
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(username_taken(&input.username));
        }

        let new_user = NewUser {
            username: input.username.clone(),
            password_hash: hash_password(&input.password)?,
            email: input.email,
        };

        let user = self.users.create(new_user).await.map_err(|e| match e {
            AppError::Conflict { .. } => username_taken(&input.username),
            other => other,
        })?;

        info!(username = %user.username, "User registered");

        Ok(user)
    }

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message whether the
    /// user is unknown or the password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username, "Login for unknown user");
            return Err(invalid_credentials());
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(username, "Login with wrong password");
            return Err(invalid_credentials());
        }

        info!(username, "User logged in");

        Ok(user)
    }

    /// Looks up a user by username.
    pub async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_username(username).await
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict("Username already exists.", json!({ "username": username }))
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}
