//! Short link resolution handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::PageContext;
use crate::web::forms::LinkPasswordForm;
use crate::web::session;

/// Password form for a protected link; posts back to `/{alias}`.
#[derive(Template, WebTemplate)]
#[template(path = "password_prompt.html")]
struct PasswordPromptTemplate {
    ctx: PageContext,
    alias: String,
    error: Option<&'static str>,
}

/// Interstitial shown before following a link flagged as dangerous.
#[derive(Template, WebTemplate)]
#[template(path = "warning.html")]
struct WarningTemplate {
    ctx: PageContext,
    url: String,
}

/// Visits a short link.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Responses
///
/// - `307 Temporary Redirect` to the destination
/// - `200 OK` password prompt or dangerous-link warning
/// - `404 Not Found` for unknown aliases
/// - `410 Gone` for expired aliases
pub async fn redirect_handler(
    State(st): State<AppState>,
    session: Session,
    Path(alias): Path<String>,
) -> Result<Response, AppError> {
    resolve(&st, &session, alias, None).await
}

/// Submits the password of a protected link.
///
/// # Endpoint
///
/// `POST /{alias}` with `password`
///
/// A correct password unlocks the alias for the rest of the session. The
/// final redirect answers `303 See Other`.
pub async fn unlock_handler(
    State(st): State<AppState>,
    session: Session,
    Path(alias): Path<String>,
    Form(form): Form<LinkPasswordForm>,
) -> Result<Response, AppError> {
    resolve(&st, &session, alias, Some(form.password)).await
}

async fn resolve(
    st: &AppState,
    session: &Session,
    alias: String,
    password: Option<String>,
) -> Result<Response, AppError> {
    let mut verified = session::verified_aliases(session).await?;
    let before = verified.len();

    let resolution = st
        .redirect_service
        .resolve(&alias, password.as_deref(), &mut verified)
        .await?;

    if verified.len() != before {
        session::store_verified_aliases(session, &verified).await?;
    }

    let response = match resolution {
        Resolution::NotFound => (StatusCode::NOT_FOUND, "Link not found").into_response(),
        Resolution::Expired => (StatusCode::GONE, "Link expired").into_response(),
        Resolution::PasswordRequired => PasswordPromptTemplate {
            ctx: PageContext::load(session).await?,
            alias,
            error: None,
        }
        .into_response(),
        Resolution::PasswordIncorrect => PasswordPromptTemplate {
            ctx: PageContext::load(session).await?,
            alias,
            error: Some("Incorrect password"),
        }
        .into_response(),
        Resolution::Warning { url } => WarningTemplate {
            ctx: PageContext::load(session).await?,
            url,
        }
        .into_response(),
        Resolution::Redirect { url } if password.is_some() => Redirect::to(&url).into_response(),
        Resolution::Redirect { url } => Redirect::temporary(&url).into_response(),
    };

    Ok(response)
}
