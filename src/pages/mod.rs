//! HTML pages: the encoder form and the payment viewer

pub mod encoder;
pub mod templates;
pub mod viewer;

use crate::config::AppConfig;
use crate::core::error::PagoError;
use axum::response::Html;
use std::sync::Arc;
use tera::{Context, Tera};

/// Application state shared across page and API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Render a page template
    pub fn render(&self, template: &str, context: &Context) -> Result<Html<String>, PagoError> {
        self.templates
            .render(template, context)
            .map(Html)
            .map_err(|e| {
                tracing::error!(template, error = ?e, "Template rendering failed");
                PagoError::Internal(format!("failed to render {}", template))
            })
    }
}
