//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Landing page (public)
//! - `GET  /logout`            - End the session (public)
//! - `/register`, `/login`     - Credential forms (public, rate limited)
//! - `/dashboard`, `/create`,
//!   `/delete/{alias}`         - Account pages (session required)
//! - `GET/POST /{alias}`       - Short link resolution (public, POST rate limited)
//! - `/static/*`               - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Sessions** - Signed session cookie backed by a server-side store
//! - **HTML snippet** - Optional markup injection into HTML pages
//! - **Rate limiting** - Per-IP token bucket on credential endpoints and link
//!   password submissions
//! - **Authentication** - Session user guard on account pages
//! - **Path normalization** - Trailing slash handling

use std::sync::Arc;

use crate::config::Config;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::{html_snippet, rate_limit, require_login, tracing};
use crate::web::session::signing_key;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

/// Router options derived from configuration.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Secret the session cookie signing key is derived from.
    pub secret_key: String,
    /// Whether the session cookie is marked `Secure`.
    pub secure_cookie: bool,
    /// When `true`, rate limiting reads client IP from forwarding headers
    /// instead of the peer socket address.
    pub behind_proxy: bool,
    /// Markup inserted before `</body>` of HTML responses.
    pub html_snippet: Option<Arc<str>>,
}

impl RouterSettings {
    /// Builds settings from configuration and an already loaded snippet.
    pub fn from_config(config: &Config, html_snippet: Option<Arc<str>>) -> Self {
        Self {
            secret_key: config.secret_key.clone(),
            secure_cookie: config.session_cookie_secure,
            behind_proxy: config.behind_proxy,
            html_snippet,
        }
    }
}

/// Constructs the application routes and middleware over `store`.
///
/// Rate limiting needs the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router<Store: SessionStore + Clone>(
    state: AppState,
    store: Store,
    settings: RouterSettings,
) -> Router {
    let auth = web::routes::auth_routes();
    let auth = if settings.behind_proxy {
        auth.layer(rate_limit::proxied_layer())
    } else {
        auth.layer(rate_limit::layer())
    };

    let protected = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_login::layer,
    ));

    let mut router = Router::new()
        .merge(web::routes::public_routes())
        .merge(auth)
        .merge(protected)
        .merge(web::routes::alias_routes(settings.behind_proxy))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    if let Some(snippet) = settings.html_snippet {
        router = router.layer(middleware::from_fn_with_state(
            snippet,
            html_snippet::layer,
        ));
    }

    let session_layer = SessionManagerLayer::new(store)
        .with_signed(signing_key(&settings.secret_key))
        .with_secure(settings.secure_cookie)
        .with_expiry(Expiry::OnSessionEnd);

    router.layer(session_layer).layer(tracing::layer())
}

/// [`router`] wrapped in trailing-slash normalization.
pub fn app_router<Store: SessionStore + Clone>(
    state: AppState,
    store: Store,
    settings: RouterSettings,
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, store, settings))
}
