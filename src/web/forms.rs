//! Form payloads posted by the HTML pages.
//!
//! Checkboxes arrive as `"on"` when ticked and are absent otherwise.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CreateLinkInput, RegisterInput};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    pub agree: Option<String>,
}

impl From<RegisterForm> for RegisterInput {
    fn from(form: RegisterForm) -> Self {
        RegisterInput {
            username: form.username.trim().to_string(),
            password: form.password,
            confirm_password: form.confirm_password,
            email: form.email.trim().to_string(),
            accepted_terms: form.agree.is_some(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkForm {
    #[serde(default)]
    #[validate(length(max = 64, message = "Alias is too long."))]
    pub alias: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL is required."))]
    pub url: String,
    pub expire: Option<String>,
    pub password: Option<String>,
    pub dangerous: Option<String>,
}

impl From<CreateLinkForm> for CreateLinkInput {
    fn from(form: CreateLinkForm) -> Self {
        CreateLinkInput {
            alias: form.alias,
            url: form.url,
            expire: form.expire,
            password: form.password,
            dangerous: form.dangerous.is_some(),
        }
    }
}

/// Password submitted on a protected link's prompt.
#[derive(Debug, Deserialize)]
pub struct LinkPasswordForm {
    #[serde(default)]
    pub password: String,
}
