//! # pago-qr
//!
//! Turn bank-transfer details into a shareable link and QR code, and read
//! them back.
//!
//! ## Features
//!
//! - **Form Validation**: 18-digit CLABE, plain beneficiary names, required header,
//!   with every failing rule reported per field
//! - **Self-Contained Links**: the record travels inside the URL as
//!   JSON → base64 → percent-encoding; no server-side storage
//! - **QR Export**: SVG for display, opaque PNG download (`qr-code.png`)
//! - **Themed Viewer**: the `garage` style attaches its stylesheet for the
//!   lifetime of the view and releases it on teardown
//! - **Copy Indicators**: per-field "copied" flags that reset after two seconds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pago::prelude::*;
//!
//! let form = PaymentForm::validate(serde_json::json!({
//!     "encabezado": "Cafe Ejemplar",
//!     "clabe": "000000000000000000",
//!     "nombreBeneficiario": "Kevin Chavez",
//! }))?;
//!
//! let link = encode_link(&form.into_record(), "https://pagos.example.mx");
//! let qr = QrImage::new(&link.url, &QrOptions::default())?;
//! std::fs::write(EXPORT_FILENAME, qr.png()?)?;
//!
//! let record = decode_payload(Some(&link.payload))?;
//! assert_eq!(record.header, "Cafe Ejemplar");
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod pages;
pub mod qr;
pub mod server;
pub mod viewer;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        codec::{PaymentLink, decode_payload, encode_link, encode_payload},
        error::{ConfigError, DecodeError, PagoError, RenderError, ValidationError},
        record::{BankInfo, PaymentRecord, StyleVariant},
        validation::{PaymentForm, Validated},
    };

    // === QR ===
    pub use crate::qr::{EXPORT_FILENAME, QrImage, QrOptions};

    // === Viewer ===
    pub use crate::viewer::{
        Clipboard, CopyField, MemoryClipboard, PageHead, StyleHost, ViewerSession, ViewerState,
    };

    // === Config ===
    pub use crate::config::{AppConfig, ThemeConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}
