//! Copy-to-clipboard with a transient "copied" indicator per field
//!
//! Every copy schedules its own reset [`COPY_RESET`] later. Resets are never
//! cancelled: a second copy inside the window does not extend the first one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// How long a field shows as copied
pub const COPY_RESET: Duration = Duration::from_secs(2);

/// Fields the viewer offers to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyField {
    #[serde(rename = "clabe")]
    RoutingCode,
    #[serde(rename = "nombreBeneficiario")]
    BeneficiaryName,
}

impl CopyField {
    pub const ALL: [CopyField; 2] = [CopyField::RoutingCode, CopyField::BeneficiaryName];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyField::RoutingCode => "clabe",
            CopyField::BeneficiaryName => "nombreBeneficiario",
        }
    }
}

/// System clipboard seam
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str);
}

/// Clipboard that keeps the last written text in memory
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
    }
}

/// Per-view copied indicators
#[derive(Clone, Default)]
pub struct CopyIndicators {
    flags: Arc<RwLock<HashMap<CopyField, bool>>>,
}

impl CopyIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_copied(&self, field: CopyField) -> bool {
        self.flags.read().await.get(&field).copied().unwrap_or(false)
    }

    /// Snapshot of every indicator, keyed by wire field name
    pub async fn snapshot(&self) -> HashMap<&'static str, bool> {
        let flags = self.flags.read().await;
        CopyField::ALL
            .iter()
            .map(|field| (field.as_str(), flags.get(field).copied().unwrap_or(false)))
            .collect()
    }

    /// Write `text` to the clipboard and flag `field` as copied
    ///
    /// Must be called inside a tokio runtime: the reset runs as a spawned task.
    pub async fn copy(&self, clipboard: &dyn Clipboard, field: CopyField, text: &str) {
        clipboard.write_text(text);
        self.flags.write().await.insert(field, true);

        let flags = self.flags.clone();
        tokio::spawn(async move {
            tokio::time::sleep(COPY_RESET).await;
            flags.write().await.insert(field, false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_only_that_field() {
        let clipboard = MemoryClipboard::new();
        let indicators = CopyIndicators::new();

        indicators
            .copy(&clipboard, CopyField::BeneficiaryName, "Kevin Chavez")
            .await;

        assert!(indicators.is_copied(CopyField::BeneficiaryName).await);
        assert!(!indicators.is_copied(CopyField::RoutingCode).await);
        assert_eq!(clipboard.contents().as_deref(), Some("Kevin Chavez"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_indicator_resets_after_two_seconds() {
        let clipboard = MemoryClipboard::new();
        let indicators = CopyIndicators::new();

        indicators
            .copy(&clipboard, CopyField::RoutingCode, "000000000000000000")
            .await;

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(indicators.is_copied(CopyField::RoutingCode).await);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!indicators.is_copied(CopyField::RoutingCode).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_copy_does_not_extend_first_reset() {
        let clipboard = MemoryClipboard::new();
        let indicators = CopyIndicators::new();

        indicators.copy(&clipboard, CopyField::RoutingCode, "1").await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        indicators.copy(&clipboard, CopyField::RoutingCode, "1").await;

        // first reset fires at t=2s even though the second copy was at t=1s
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!indicators.is_copied(CopyField::RoutingCode).await);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!indicators.is_copied(CopyField::RoutingCode).await);
    }

    #[tokio::test]
    async fn test_snapshot_uses_wire_names() {
        let indicators = CopyIndicators::new();
        let snapshot = indicators.snapshot().await;
        assert_eq!(snapshot.get("clabe"), Some(&false));
        assert_eq!(snapshot.get("nombreBeneficiario"), Some(&false));
    }
}
