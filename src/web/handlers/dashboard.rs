//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::IntoResponse};
use tower_sessions::Session;

use crate::domain::entities::LinkSummary;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::PageContext;
use crate::web::middleware::require_login::CurrentUser;

/// Template for the dashboard page.
///
/// Renders `templates/dashboard.html` with the owner's links, newest first,
/// each with its expiration date when one is set.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    ctx: PageContext,
    links: Vec<LinkSummary>,
}

/// Lists the current user's links.
///
/// # Endpoint
///
/// `GET /dashboard` (login required)
pub async fn dashboard_handler(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let links = st.link_service.list_for_owner(user.id).await?;

    Ok(DashboardTemplate {
        ctx: PageContext::load(&session).await?,
        links,
    })
}
