//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::error::AppError;
use crate::web::flash::PageContext;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct HomeTemplate {
    ctx: PageContext,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(session: Session) -> Result<impl IntoResponse, AppError> {
    Ok(HomeTemplate {
        ctx: PageContext::load(&session).await?,
    })
}
