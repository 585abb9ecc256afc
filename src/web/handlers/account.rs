//! Registration, login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use validator::Validate;

use super::flash_error;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, PageContext};
use crate::web::forms::{LoginForm, RegisterForm};
use crate::web::session;

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    ctx: PageContext,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    ctx: PageContext,
}

/// `GET /register`
pub async fn register_form(session: Session) -> Result<impl IntoResponse, AppError> {
    Ok(RegisterTemplate {
        ctx: PageContext::load(&session).await?,
    })
}

/// Creates an account, then sends the visitor to the login page.
///
/// # Endpoint
///
/// `POST /register` with `username`, `password`, `confirm_password`,
/// `email` and the `agree` checkbox.
pub async fn register_submit(
    State(st): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(e) = form.validate() {
        return flash_error(&session, e.into(), "/register").await;
    }

    match st.account_service.register(form.into()).await {
        Ok(_) => {
            flash::push(
                &session,
                FlashLevel::Success,
                "Registration successful. Please log in.",
            )
            .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => flash_error(&session, e, "/register").await,
    }
}

/// `GET /login`
pub async fn login_form(session: Session) -> Result<impl IntoResponse, AppError> {
    Ok(LoginTemplate {
        ctx: PageContext::load(&session).await?,
    })
}

/// Checks credentials and starts an authenticated session.
///
/// # Endpoint
///
/// `POST /login` with `username` and `password`.
pub async fn login_submit(
    State(st): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(e) = form.validate() {
        return flash_error(&session, e.into(), "/login").await;
    }

    match st
        .account_service
        .login(form.username.trim(), &form.password)
        .await
    {
        Ok(user) => {
            session::log_in(&session, &user.username).await?;
            flash::push(&session, FlashLevel::Success, "Login successful").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => flash_error(&session, e, "/login").await,
    }
}

/// Ends the session, forgetting any unlocked links.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session::log_out(&session).await?;
    flash::push(&session, FlashLevel::Info, "You have been logged out.").await?;
    Ok(Redirect::to("/login").into_response())
}
