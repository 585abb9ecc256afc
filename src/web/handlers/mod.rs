//! HTML page handlers.
//!
//! Form submissions follow post/redirect/get: user-facing failures are
//! flashed and the browser is sent back to the originating form.

mod account;
mod dashboard;
mod home;
mod links;
mod redirect;

pub use account::{login_form, login_submit, logout, register_form, register_submit};
pub use dashboard::dashboard_handler;
pub use home::home_handler;
pub use links::{create_form, create_submit, delete_handler};
pub use redirect::{redirect_handler, unlock_handler};

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::error::AppError;
use crate::web::flash::{self, FlashLevel};

/// Flashes a user-facing error and redirects to `to`; other errors propagate.
async fn flash_error(session: &Session, err: AppError, to: &str) -> Result<Response, AppError> {
    if !err.is_user_facing() {
        return Err(err);
    }

    flash::push(session, FlashLevel::Danger, err.message()).await?;
    Ok(Redirect::to(to).into_response())
}
