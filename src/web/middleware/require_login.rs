//! Session-based authentication guard for account pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel};
use crate::web::session::{USER_KEY, current_username};

/// The authenticated account, inserted into request extensions by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Lets the request through only when the session names an existing user.
///
/// # Authentication Flow
///
/// 1. Read the username stored under [`USER_KEY`]
/// 2. Load the account via [`crate::application::services::AccountService::find_user`]
/// 3. On success, expose it to handlers as [`CurrentUser`]
/// 4. Otherwise redirect to `/login`
///
/// A session naming an account that no longer exists is logged out.
///
/// # Example
///
/// ```rust,ignore
/// let protected = web::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_login::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(username) = current_username(&session).await? else {
        flash::push(&session, FlashLevel::Info, "Please log in to continue.").await?;
        return Ok(Redirect::to("/login").into_response());
    };

    let Some(user) = st.account_service.find_user(&username).await? else {
        tracing::info!(%username, "Session user no longer exists");
        session.remove::<String>(USER_KEY).await?;
        flash::push(&session, FlashLevel::Info, "Please log in to continue.").await?;
        return Ok(Redirect::to("/login").into_response());
    };

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
