//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_form, create_submit, dashboard_handler, delete_handler, home_handler, login_form,
    login_submit, logout, redirect_handler, register_form, register_submit, unlock_handler,
};
use crate::web::middleware::rate_limit;
use axum::{
    Router,
    routing::{get, post},
};

/// Public pages.
///
/// # Endpoints
///
/// - `GET /` - Landing page
/// - `GET /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/logout", get(logout))
}

/// Credential forms. Rate limited by the caller.
///
/// # Endpoints
///
/// - `GET/POST /register` - Account creation
/// - `GET/POST /login` - Sign in
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register_submit))
        .route("/login", get(login_form).post(login_submit))
}

/// Account pages requiring a logged-in session.
///
/// Protected via [`crate::web::middleware::require_login`].
///
/// # Endpoints
///
/// - `GET /dashboard` - The user's links
/// - `GET/POST /create` - New link form
/// - `GET /delete/{alias}` - Delete one of the user's links
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/create", get(create_form).post(create_submit))
        .route("/delete/{alias}", get(delete_handler))
}

/// Short link resolution.
///
/// Password submissions go through the same per-IP limiter as the credential
/// forms; plain visits are not limited.
///
/// # Endpoints
///
/// - `GET /{alias}` - Visit a link
/// - `POST /{alias}` - Submit a protected link's password
pub fn alias_routes(behind_proxy: bool) -> Router<AppState> {
    let unlock = if behind_proxy {
        post(unlock_handler).layer(rate_limit::proxied_layer())
    } else {
        post(unlock_handler).layer(rate_limit::layer())
    };

    Router::new().route("/{alias}", get(redirect_handler).merge(unlock))
}
