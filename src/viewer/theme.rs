//! Alternate theme as a scoped page resource
//!
//! A garage view attaches its stylesheet to the page head when it mounts and
//! detaches it when the view is torn down. [`ThemeGuard`] ties the detach to
//! `Drop`, so a view can never leak its stylesheet into the next one.

use crate::core::record::StyleVariant;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Element id of the alternate stylesheet
pub const GARAGE_STYLESHEET_ID: &str = "garage-stylesheet";

/// A `<link rel="stylesheet">` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub id: String,
    pub href: String,
}

/// Anything that can hold stylesheets for the lifetime of a view
pub trait StyleHost: Send + Sync {
    /// Attach a stylesheet, replacing any with the same id
    fn attach(&self, sheet: Stylesheet);

    /// Detach the stylesheet with this id, if present
    fn detach(&self, id: &str);
}

/// The stylesheet to attach for a style, if any
pub fn stylesheet_for(style: StyleVariant, garage_href: &str) -> Option<Stylesheet> {
    match style {
        StyleVariant::Garage => Some(Stylesheet {
            id: GARAGE_STYLESHEET_ID.to_string(),
            href: garage_href.to_string(),
        }),
        StyleVariant::Neutral => None,
    }
}

/// In-memory page head, rendered into `<head>` by the page templates
#[derive(Clone, Default)]
pub struct PageHead {
    sheets: Arc<Mutex<Vec<Stylesheet>>>,
}

impl PageHead {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Stylesheet>> {
        // A panic while holding the lock leaves a plain Vec behind; keep using it.
        self.sheets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Currently attached stylesheets, in attach order
    pub fn stylesheets(&self) -> Vec<Stylesheet> {
        self.lock().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().iter().any(|sheet| sheet.id == id)
    }
}

impl StyleHost for PageHead {
    fn attach(&self, sheet: Stylesheet) {
        let mut sheets = self.lock();
        sheets.retain(|existing| existing.id != sheet.id);
        sheets.push(sheet);
    }

    fn detach(&self, id: &str) {
        self.lock().retain(|sheet| sheet.id != id);
    }
}

/// Holds an attached stylesheet; detaches it on drop
pub struct ThemeGuard {
    host: Arc<dyn StyleHost>,
    id: String,
}

impl ThemeGuard {
    pub fn acquire(host: Arc<dyn StyleHost>, sheet: Stylesheet) -> Self {
        let id = sheet.id.clone();
        host.attach(sheet);
        tracing::debug!(stylesheet = %id, "Theme stylesheet attached");
        Self { host, id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for ThemeGuard {
    fn drop(&mut self) {
        self.host.detach(&self.id);
        tracing::debug!(stylesheet = %self.id, "Theme stylesheet detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_has_no_stylesheet() {
        assert!(stylesheet_for(StyleVariant::Neutral, "/garage.css").is_none());
    }

    #[test]
    fn test_garage_stylesheet_uses_href() {
        let sheet = stylesheet_for(StyleVariant::Garage, "/static/garage.css").unwrap();
        assert_eq!(sheet.id, GARAGE_STYLESHEET_ID);
        assert_eq!(sheet.href, "/static/garage.css");
    }

    #[test]
    fn test_guard_detaches_on_drop() {
        let head = PageHead::new();
        let sheet = stylesheet_for(StyleVariant::Garage, "/garage.css").unwrap();

        let guard = ThemeGuard::acquire(Arc::new(head.clone()), sheet);
        assert!(head.contains(GARAGE_STYLESHEET_ID));

        drop(guard);
        assert!(!head.contains(GARAGE_STYLESHEET_ID));
    }

    #[test]
    fn test_attach_same_id_does_not_duplicate() {
        let head = PageHead::new();
        let sheet = stylesheet_for(StyleVariant::Garage, "/garage.css").unwrap();
        head.attach(sheet.clone());
        head.attach(sheet);
        assert_eq!(head.stylesheets().len(), 1);
    }

    #[test]
    fn test_detach_leaves_other_sheets() {
        let head = PageHead::new();
        head.attach(Stylesheet {
            id: "base".to_string(),
            href: "/base.css".to_string(),
        });
        let guard = ThemeGuard::acquire(
            Arc::new(head.clone()),
            stylesheet_for(StyleVariant::Garage, "/garage.css").unwrap(),
        );
        drop(guard);

        let ids: Vec<String> = head.stylesheets().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["base".to_string()]);
    }
}
