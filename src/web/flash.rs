//! One-shot messages carried in the session to the next rendered page.

use serde::{Deserialize, Serialize};
use std::fmt;
use tower_sessions::Session;

use crate::error::AppError;
use crate::web::session::current_username;

const FLASH_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let css = match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        };
        f.write_str(css)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queues a message for the next rendered page.
pub async fn push(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), AppError> {
    let mut flashes: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(FLASH_KEY, flashes).await?;
    Ok(())
}

/// Removes and returns all queued messages.
pub async fn take(session: &Session) -> Result<Vec<Flash>, AppError> {
    Ok(session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

/// Data every page template renders in its layout: the session user for the
/// navigation bar and the pending flash messages.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<String>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Loads the session user and drains pending flashes.
    pub async fn load(session: &Session) -> Result<Self, AppError> {
        Ok(Self {
            user: current_username(session).await?,
            flashes: take(session).await?,
        })
    }
}
