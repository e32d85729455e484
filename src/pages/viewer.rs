//! Viewer page for `/qr?q=<payload>`

use super::AppState;
use super::templates::GARAGE_CSS;
use crate::core::codec::payload_param;
use crate::core::error::PagoError;
use crate::viewer::{COPY_RESET, PageHead, ViewerSession};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use std::sync::Arc;
use tera::Context;

/// GET /qr - decode the link and show the payment details
///
/// Always 200: a missing or broken payload renders the page with an alert.
/// Only the first `q` is read; other parameters are ignored.
pub async fn viewer_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, PagoError> {
    let head = PageHead::new();
    let mut session = ViewerSession::open(payload_param(&pairs));
    session.mount(Arc::new(head.clone()), &state.config.theme);

    let garage = session.style().is_garage();

    let mut context = Context::new();
    context.insert("state", session.state().name());
    context.insert("title", session.title());
    context.insert("record", &session.record());
    context.insert("error", &session.error().map(|e| e.to_string()));
    context.insert("garage", &garage);
    context.insert("page_class", if garage { "garage-page" } else { "" });
    context.insert("stylesheets", &head.stylesheets());
    context.insert("copied", &session.copied().await);
    context.insert("copy_reset_ms", &(COPY_RESET.as_millis() as u64));

    let page = state.render("viewer.html", &context);
    session.unmount();
    page
}

/// GET /garage.css
pub async fn garage_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], GARAGE_CSS)
}
