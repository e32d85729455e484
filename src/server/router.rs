//! Router builder utilities for the encoder and viewer

use crate::api::handlers::{decode, encode, encode_png};
use crate::pages::AppState;
use crate::pages::encoder::{encoder_page, submit_form};
use crate::pages::viewer::{garage_stylesheet, viewer_page};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the HTML page routes
///
/// - GET  /            - Encoder form (`?ejemplo=1` prefills the sample)
/// - POST /            - Form submission, re-renders with the link or errors
/// - GET  /qr          - Viewer for `?q=<payload>`
/// - GET  /garage.css  - Alternate theme stylesheet
pub fn build_page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(encoder_page).post(submit_form))
        .route("/qr", get(viewer_page))
        .route("/garage.css", get(garage_stylesheet))
        .with_state(state)
}

/// Build the JSON API routes
///
/// - POST /api/encode      - Form → `{ url, payload, svg }`
/// - POST /api/encode/png  - Form → PNG attachment
/// - GET  /api/decode      - `?q=<payload>` → record
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/encode", post(encode))
        .route("/api/encode/png", post(encode_png))
        .route("/api/decode", get(decode))
        .with_state(state)
}
