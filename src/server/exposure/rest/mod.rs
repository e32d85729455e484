//! REST exposure for the service
//!
//! Consumes a `ServerHost` and produces an Axum `Router` serving the HTML
//! pages, the JSON API and health checks.

use super::super::host::ServerHost;
use crate::pages::AppState;
use crate::server::router::{build_api_routes, build_page_routes};
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// REST exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing configuration and templates
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// A router with health, page, API and custom routes, traced per request.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = AppState {
            config: host.config.clone(),
            templates: host.templates.clone(),
        };

        let mut app = Self::health_routes()
            .merge(build_page_routes(state.clone()))
            .merge(build_api_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "pago-qr"
        }))
    }
}
