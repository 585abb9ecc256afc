//! Response decoration with a configured HTML fragment.
//!
//! When `HTML_SNIPPET_FILE` is set, its contents are inserted right before
//! the closing `</body>` tag of every `text/html` response. Other responses
//! pass through untouched.

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Inserts `snippet` before the last `</body>` of `html`.
///
/// Returns `None` when the document has no closing body tag.
pub fn inject(html: &str, snippet: &str) -> Option<String> {
    let pos = html.rfind("</body>")?;

    let mut out = String::with_capacity(html.len() + snippet.len());
    out.push_str(&html[..pos]);
    out.push_str(snippet);
    out.push_str(&html[pos..]);
    Some(out)
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"))
}

/// Middleware applying [`inject`] to HTML responses.
///
/// # Example
///
/// ```rust,ignore
/// let snippet: Arc<str> = std::fs::read_to_string(path)?.into();
/// let app = router.layer(middleware::from_fn_with_state(snippet, html_snippet::layer));
/// ```
pub async fn layer(State(snippet): State<Arc<str>>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if !is_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer HTML response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let decorated = std::str::from_utf8(&bytes)
        .ok()
        .and_then(|html| inject(html, &snippet));

    match decorated {
        Some(html) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(html))
        }
        None => Response::from_parts(parts, Body::from(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, middleware, response::Html, routing::get};
    use tower::ServiceExt;

    const SNIPPET: &str = "<script src=\"/x.js\"></script>";

    #[test]
    fn test_inject_before_closing_body() {
        let html = "<html><body><p>hi</p></body></html>";

        assert_eq!(
            inject(html, SNIPPET).as_deref(),
            Some("<html><body><p>hi</p><script src=\"/x.js\"></script></body></html>")
        );
    }

    #[test]
    fn test_inject_without_body_tag() {
        assert_eq!(inject("<p>fragment</p>", SNIPPET), None);
    }

    fn app() -> Router {
        Router::new()
            .route("/page", get(|| async { Html("<body>page</body>") }))
            .route("/text", get(|| async { "plain </body>" }))
            .layer(middleware::from_fn_with_state(
                Arc::<str>::from(SNIPPET),
                layer,
            ))
    }

    async fn body_of(uri: &str) -> String {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_html_response_is_decorated() {
        assert_eq!(
            body_of("/page").await,
            format!("<body>page{SNIPPET}</body>")
        );
    }

    #[tokio::test]
    async fn test_non_html_response_is_untouched() {
        assert_eq!(body_of("/text").await, "plain </body>");
    }
}
