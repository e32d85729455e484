//! Payment record shared by the encoder and the viewer
//!
//! The serde attributes on these types ARE the wire schema: any link produced
//! or consumed by this crate carries exactly
//!
//! ```text
//! {
//!   "encabezado": string,
//!   "informacionBancaria": { "clabe": string, "nombreBeneficiario": string },
//!   "estilo": "neutral" | "garage"
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::validation::payment_form_rules;

/// Display theme discriminator
///
/// Only changes presentation, never data semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    #[default]
    Neutral,
    Garage,
}

impl StyleVariant {
    /// All accepted literals, in form order
    pub const LITERALS: [&'static str; 2] = ["neutral", "garage"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleVariant::Neutral => "neutral",
            StyleVariant::Garage => "garage",
        }
    }

    /// Parse a form literal. Returns `None` for anything else.
    pub fn from_literal(value: &str) -> Option<Self> {
        match value {
            "neutral" => Some(StyleVariant::Neutral),
            "garage" => Some(StyleVariant::Garage),
            _ => None,
        }
    }

    pub fn is_garage(&self) -> bool {
        matches!(self, StyleVariant::Garage)
    }
}

impl fmt::Display for StyleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank information grouping
///
/// The routing code and the beneficiary name always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    /// 18-digit CLABE
    #[serde(rename = "clabe")]
    pub routing_code: String,

    #[serde(rename = "nombreBeneficiario")]
    pub beneficiary_name: String,
}

/// A payment record as it travels inside a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(rename = "encabezado")]
    pub header: String,

    #[serde(rename = "informacionBancaria")]
    pub bank_info: BankInfo,

    #[serde(rename = "estilo", default, deserialize_with = "lenient_style")]
    pub style: StyleVariant,
}

/// Absent, null or unknown `estilo` values render as neutral
fn lenient_style<'de, D>(deserializer: D) -> Result<StyleVariant, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(StyleVariant::from_literal)
        .unwrap_or_default())
}

impl PaymentRecord {
    pub fn new(
        header: impl Into<String>,
        routing_code: impl Into<String>,
        beneficiary_name: impl Into<String>,
        style: StyleVariant,
    ) -> Self {
        Self {
            header: header.into(),
            bank_info: BankInfo {
                routing_code: routing_code.into(),
                beneficiary_name: beneficiary_name.into(),
            },
            style,
        }
    }

    pub fn routing_code(&self) -> &str {
        &self.bank_info.routing_code
    }

    pub fn beneficiary_name(&self) -> &str {
        &self.bank_info.beneficiary_name
    }

    /// Form rules this record breaks, as `(field, message)` pairs
    ///
    /// Decoded records are displayed as-is; this is only used to report
    /// links that could not have come out of the encoder form.
    pub fn anomalies(&self) -> Vec<(&'static str, String)> {
        let rules = payment_form_rules();
        let mut found = Vec::new();
        let checks: [(&'static str, &str); 3] = [
            ("encabezado", self.header.as_str()),
            ("clabe", self.bank_info.routing_code.as_str()),
            ("nombreBeneficiario", self.bank_info.beneficiary_name.as_str()),
        ];

        for (field, value) in checks {
            for message in rules.check_field(field, &serde_json::Value::from(value)) {
                found.push((field, message));
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example() -> PaymentRecord {
        PaymentRecord::new(
            "Cafe Ejemplar",
            "000000000000000000",
            "Kevin Chavez",
            StyleVariant::Neutral,
        )
    }

    // === wire shape ===

    #[test]
    fn test_serializes_to_nested_spanish_keys() {
        let value = serde_json::to_value(example()).unwrap();
        assert_eq!(
            value,
            json!({
                "encabezado": "Cafe Ejemplar",
                "informacionBancaria": {
                    "clabe": "000000000000000000",
                    "nombreBeneficiario": "Kevin Chavez"
                },
                "estilo": "neutral"
            })
        );
    }

    #[test]
    fn test_missing_estilo_defaults_to_neutral() {
        let record: PaymentRecord = serde_json::from_value(json!({
            "encabezado": "Taller",
            "informacionBancaria": { "clabe": "012345678901234567", "nombreBeneficiario": "Ana" }
        }))
        .unwrap();
        assert_eq!(record.style, StyleVariant::Neutral);
    }

    #[test]
    fn test_null_and_unknown_estilo_render_neutral() {
        for estilo in [json!(null), json!("retro"), json!(3)] {
            let record: PaymentRecord = serde_json::from_value(json!({
                "encabezado": "Taller",
                "informacionBancaria": { "clabe": "1", "nombreBeneficiario": "Ana" },
                "estilo": estilo
            }))
            .unwrap();
            assert_eq!(record.style, StyleVariant::Neutral);
        }
    }

    #[test]
    fn test_garage_estilo_parsed() {
        let record: PaymentRecord = serde_json::from_value(json!({
            "encabezado": "Taller",
            "informacionBancaria": { "clabe": "1", "nombreBeneficiario": "Ana" },
            "estilo": "garage"
        }))
        .unwrap();
        assert!(record.style.is_garage());
    }

    #[test]
    fn test_missing_bank_info_is_rejected() {
        let result: Result<PaymentRecord, _> =
            serde_json::from_value(json!({ "encabezado": "Taller", "estilo": "neutral" }));
        assert!(result.is_err());
    }

    // === anomalies() ===

    #[test]
    fn test_valid_record_has_no_anomalies() {
        assert!(example().anomalies().is_empty());
    }

    #[test]
    fn test_short_clabe_is_an_anomaly() {
        let record = PaymentRecord::new("X", "123", "Ana", StyleVariant::Neutral);
        let anomalies = record.anomalies();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].0, "clabe");
    }

    #[test]
    fn test_style_literals() {
        assert_eq!(StyleVariant::from_literal("garage"), Some(StyleVariant::Garage));
        assert_eq!(StyleVariant::from_literal("Garage"), None);
        assert_eq!(StyleVariant::Garage.to_string(), "garage");
    }
}
