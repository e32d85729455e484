//! Viewer side: per-view state for a decoded payment link
//!
//! ```text
//!            ┌──────────┐ q absent
//!  open ────▶│  NoCode  │
//!            └──────────┘
//!            ┌──────────┐ mount  ┌──────────────┐
//!  open ────▶│ Decoding │───────▶│   Decoded    │
//!   q given  └──────────┘   └───▶│ DecodeError  │
//!                                └──────────────┘
//! ```
//!
//! Every state but `Decoding` is terminal. A session is one view: create a
//! new one when the parameter changes.
//!
//! The copy model here is what the rendered page's script follows: one button
//! per field (`data-copy` carries the field's wire name), each flipping to
//! "Copiado" on its own and back after [`COPY_RESET`]. The page is rendered
//! with the session's [`ViewerSession::copied`] flags as the initial labels.

pub mod clipboard;
pub mod theme;

pub use clipboard::{COPY_RESET, Clipboard, CopyField, CopyIndicators, MemoryClipboard};
pub use theme::{GARAGE_STYLESHEET_ID, PageHead, StyleHost, Stylesheet, ThemeGuard};

use crate::config::ThemeConfig;
use crate::core::codec::decode_payload;
use crate::core::error::DecodeError;
use crate::core::record::{PaymentRecord, StyleVariant};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Title shown when there is no record to take it from
pub const FALLBACK_TITLE: &str = "Detalles del Pago";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    NoCode,
    Decoding,
    Decoded(PaymentRecord),
    DecodeError(DecodeError),
}

impl ViewerState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewerState::Decoding)
    }

    /// Stable name, used by templates
    pub fn name(&self) -> &'static str {
        match self {
            ViewerState::NoCode => "no_code",
            ViewerState::Decoding => "decoding",
            ViewerState::Decoded(_) => "decoded",
            ViewerState::DecodeError(_) => "decode_error",
        }
    }
}

/// One view of a payment link
pub struct ViewerSession {
    id: Uuid,
    pending: Option<String>,
    state: ViewerState,
    indicators: CopyIndicators,
    theme: Option<ThemeGuard>,
}

impl ViewerSession {
    /// Start a view from the raw `q` value
    pub fn open(raw: Option<&str>) -> Self {
        let pending = raw.filter(|q| !q.is_empty()).map(str::to_string);
        let state = if pending.is_some() {
            ViewerState::Decoding
        } else {
            ViewerState::NoCode
        };

        Self {
            id: Uuid::new_v4(),
            pending,
            state,
            indicators: CopyIndicators::new(),
            theme: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Decode the pending payload and acquire the theme
    ///
    /// Runs at most once; later calls leave a terminal state untouched.
    pub fn mount(&mut self, host: Arc<dyn StyleHost>, themes: &ThemeConfig) {
        if let Some(raw) = self.pending.take() {
            self.state = match decode_payload(Some(&raw)) {
                Ok(record) => {
                    let anomalies = record.anomalies();
                    if !anomalies.is_empty() {
                        tracing::warn!(
                            view_id = %self.id,
                            anomalies = ?anomalies,
                            "Decoded record breaks form rules, displaying as-is"
                        );
                    }
                    ViewerState::Decoded(record)
                }
                Err(e) => {
                    if let DecodeError::InvalidFormat { reason } = &e {
                        tracing::warn!(view_id = %self.id, reason = %reason, "Could not decode payload");
                    }
                    ViewerState::DecodeError(e)
                }
            };
        }

        if self.theme.is_none() {
            if let Some(sheet) = theme::stylesheet_for(self.style(), &themes.garage_stylesheet) {
                self.theme = Some(ThemeGuard::acquire(host, sheet));
            }
        }

        tracing::debug!(view_id = %self.id, state = self.state.name(), "Viewer mounted");
    }

    /// Tear the view down, releasing the theme
    pub fn unmount(self) {
        tracing::debug!(view_id = %self.id, "Viewer unmounted");
    }

    pub fn record(&self) -> Option<&PaymentRecord> {
        match &self.state {
            ViewerState::Decoded(record) => Some(record),
            _ => None,
        }
    }

    /// Page-level error for the view, if any
    pub fn error(&self) -> Option<DecodeError> {
        match &self.state {
            ViewerState::NoCode => Some(DecodeError::NoCode),
            ViewerState::DecodeError(e) => Some(e.clone()),
            _ => None,
        }
    }

    pub fn style(&self) -> StyleVariant {
        self.record().map(|r| r.style).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.record()
            .map(|r| r.header.as_str())
            .filter(|h| !h.is_empty())
            .unwrap_or(FALLBACK_TITLE)
    }

    pub fn theme_attached(&self) -> bool {
        self.theme.is_some()
    }

    /// Copy a decoded field to the clipboard
    ///
    /// Returns `false` when there is no decoded record to copy from.
    pub async fn copy(&self, clipboard: &dyn Clipboard, field: CopyField) -> bool {
        let Some(record) = self.record() else {
            return false;
        };

        let text = match field {
            CopyField::RoutingCode => record.routing_code(),
            CopyField::BeneficiaryName => record.beneficiary_name(),
        };

        self.indicators.copy(clipboard, field, text).await;
        true
    }

    pub async fn is_copied(&self, field: CopyField) -> bool {
        self.indicators.is_copied(field).await
    }

    /// Copied flags keyed by wire name, as the page labels read them
    pub async fn copied(&self) -> HashMap<&'static str, bool> {
        self.indicators.snapshot().await
    }
}
