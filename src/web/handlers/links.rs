//! Link creation and deletion handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use validator::Validate;

use super::flash_error;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, PageContext};
use crate::web::forms::CreateLinkForm;
use crate::web::middleware::require_login::CurrentUser;

#[derive(Template, WebTemplate)]
#[template(path = "create.html")]
struct CreateTemplate {
    ctx: PageContext,
}

/// `GET /create` (login required)
pub async fn create_form(session: Session) -> Result<impl IntoResponse, AppError> {
    Ok(CreateTemplate {
        ctx: PageContext::load(&session).await?,
    })
}

/// Creates a short link owned by the current user.
///
/// # Endpoint
///
/// `POST /create` (login required) with `alias`, `url`, and optional
/// `expire` (`YYYY-MM-DD`), `password` and `dangerous` checkbox.
///
/// Invalid input, a malformed date or a taken alias is flashed and nothing
/// is stored.
pub async fn create_submit(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<CreateLinkForm>,
) -> Result<Response, AppError> {
    if let Err(e) = form.validate() {
        return flash_error(&session, e.into(), "/create").await;
    }

    match st.link_service.create_link(&user, form.into()).await {
        Ok(_) => {
            flash::push(&session, FlashLevel::Success, "Short link created.").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => flash_error(&session, e, "/create").await,
    }
}

/// Deletes one of the current user's links.
///
/// # Endpoint
///
/// `GET /delete/{alias}` (login required)
///
/// Aliases owned by someone else, or unknown, are left alone without
/// feedback.
pub async fn delete_handler(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
    Path(alias): Path<String>,
) -> Result<Response, AppError> {
    if st.link_service.delete_link(&user, &alias).await? {
        flash::push(&session, FlashLevel::Info, "Link deleted.").await?;
    }

    Ok(Redirect::to("/dashboard").into_response())
}
