//! The encoder form and its rules

use super::config::FormValidationConfig;
use super::extractor::ValidatableForm;
use super::{filters, validators};
use crate::core::error::ValidationError;
use crate::core::record::{PaymentRecord, StyleVariant};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Length of a CLABE
pub const ROUTING_CODE_LEN: usize = 18;

/// Maximum length of the beneficiary name
pub const BENEFICIARY_NAME_MAX: usize = 80;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

static PLAIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s]+$").expect("name pattern is valid"));

static RULES: LazyLock<FormValidationConfig> = LazyLock::new(build_rules);

fn build_rules() -> FormValidationConfig {
    let mut config = FormValidationConfig::new();

    config.add_filter("encabezado", filters::text());
    config.add_validator("encabezado", validators::string("El encabezado debe ser texto"));
    config.add_validator(
        "encabezado",
        validators::min_chars(1, "El encabezado es requerido"),
    );

    config.add_filter("clabe", filters::text());
    config.add_validator("clabe", validators::string("La CLABE debe ser texto"));
    config.add_validator(
        "clabe",
        validators::exact_chars(
            ROUTING_CODE_LEN,
            "La CLABE debe tener exactamente 18 dígitos",
        ),
    );
    config.add_validator(
        "clabe",
        validators::matches(&DIGITS, "La CLABE solo debe contener números"),
    );

    config.add_filter("nombreBeneficiario", filters::text());
    config.add_validator(
        "nombreBeneficiario",
        validators::string("El nombre debe ser texto"),
    );
    config.add_validator(
        "nombreBeneficiario",
        validators::max_chars(
            BENEFICIARY_NAME_MAX,
            "El nombre no puede exceder 80 caracteres",
        ),
    );
    config.add_validator(
        "nombreBeneficiario",
        validators::matches(
            &PLAIN_NAME,
            "El nombre no debe contener caracteres especiales",
        ),
    );
    config.add_validator(
        "nombreBeneficiario",
        validators::min_chars(1, "El nombre del beneficiario es requerido"),
    );

    config.add_filter("estilo", filters::default_to("neutral"));
    config.add_validator(
        "estilo",
        validators::in_list(
            &StyleVariant::LITERALS,
            "El estilo debe ser 'neutral' o 'garage'",
        ),
    );
    config.add_validator(
        "estilo",
        validators::string("El estilo debe ser 'neutral' o 'garage'"),
    );

    config
}

/// Rules shared by the form gate and decoded-record anomaly checks
pub fn payment_form_rules() -> &'static FormValidationConfig {
    &RULES
}

/// Encoder form input, flat as the form submits it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    #[serde(rename = "encabezado", default)]
    pub header: String,

    #[serde(rename = "clabe", default)]
    pub routing_code: String,

    #[serde(rename = "nombreBeneficiario", default)]
    pub beneficiary_name: String,

    #[serde(rename = "estilo", default)]
    pub style: StyleVariant,
}

impl ValidatableForm for PaymentForm {
    fn validation_rules() -> &'static FormValidationConfig {
        payment_form_rules()
    }
}

impl PaymentForm {
    /// The sample merchant the form offers to prefill
    pub fn example() -> Self {
        Self {
            header: "Cafe Ejemplar".to_string(),
            routing_code: "000000000000000000".to_string(),
            beneficiary_name: "Kevin Chavez".to_string(),
            style: StyleVariant::Neutral,
        }
    }

    /// Validate raw form input and build a typed form
    ///
    /// All-or-nothing: any failing rule rejects the whole submission.
    pub fn validate(payload: Value) -> Result<Self, ValidationError> {
        let filtered = payment_form_rules()
            .validate_and_filter(payload)
            .map_err(ValidationError::FieldErrors)?;

        serde_json::from_value(filtered).map_err(|e| ValidationError::InvalidBody {
            message: e.to_string(),
        })
    }

    /// Validate this form as if it had been submitted
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidBody {
            message: e.to_string(),
        })?;
        Self::validate(payload)
    }

    pub fn into_record(self) -> PaymentRecord {
        PaymentRecord::new(
            self.header,
            self.routing_code,
            self.beneficiary_name,
            self.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_for(payload: Value) -> super::super::config::FieldErrors {
        match PaymentForm::validate(payload) {
            Err(ValidationError::FieldErrors(errors)) => errors,
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    // === accepted input ===

    #[test]
    fn test_example_is_valid() {
        let form = PaymentForm::example().validated().unwrap();
        assert_eq!(form, PaymentForm::example());
    }

    #[test]
    fn test_estilo_defaults_to_neutral() {
        let form = PaymentForm::validate(json!({
            "encabezado": "Taller Don Beto",
            "clabe": "012180001234567891",
            "nombreBeneficiario": "Roberto Gomez"
        }))
        .unwrap();
        assert_eq!(form.style, StyleVariant::Neutral);
    }

    #[test]
    fn test_empty_estilo_defaults_to_neutral() {
        let form = PaymentForm::validate(json!({
            "encabezado": "Taller",
            "clabe": "012180001234567891",
            "nombreBeneficiario": "Roberto Gomez",
            "estilo": ""
        }))
        .unwrap();
        assert_eq!(form.style, StyleVariant::Neutral);
    }

    #[test]
    fn test_name_with_whitespace_and_digits_accepted() {
        let form = PaymentForm::validate(json!({
            "encabezado": "X",
            "clabe": "012180001234567891",
            "nombreBeneficiario": "Sucursal 42\tNorte",
            "estilo": "garage"
        }))
        .unwrap();
        assert_eq!(form.style, StyleVariant::Garage);
    }

    #[test]
    fn test_name_of_exactly_80_chars_accepted() {
        let name = "a".repeat(80);
        assert!(
            PaymentForm::validate(json!({
                "encabezado": "X",
                "clabe": "012180001234567891",
                "nombreBeneficiario": name
            }))
            .is_ok()
        );
    }

    // === rejected input ===

    #[test]
    fn test_empty_header_rejected() {
        let mut form = PaymentForm::example();
        form.header.clear();
        let errors = errors_for(serde_json::to_value(&form).unwrap());
        assert_eq!(errors["encabezado"], vec!["El encabezado es requerido"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_clabe_rejected() {
        let mut form = PaymentForm::example();
        form.routing_code = "12345".to_string();
        let errors = errors_for(serde_json::to_value(&form).unwrap());
        assert_eq!(
            errors["clabe"],
            vec!["La CLABE debe tener exactamente 18 dígitos"]
        );
    }

    #[test]
    fn test_clabe_with_letter_rejected() {
        let mut form = PaymentForm::example();
        form.routing_code = "00000000000000000A".to_string();
        let errors = errors_for(serde_json::to_value(&form).unwrap());
        assert_eq!(errors["clabe"], vec!["La CLABE solo debe contener números"]);
    }

    #[test]
    fn test_clabe_of_19_digits_rejected() {
        let mut form = PaymentForm::example();
        form.routing_code = "0".repeat(19);
        assert!(errors_for(serde_json::to_value(&form).unwrap()).contains_key("clabe"));
    }

    #[test]
    fn test_long_name_rejected() {
        let mut form = PaymentForm::example();
        form.beneficiary_name = "a".repeat(81);
        let errors = errors_for(serde_json::to_value(&form).unwrap());
        assert_eq!(
            errors["nombreBeneficiario"],
            vec!["El nombre no puede exceder 80 caracteres"]
        );
    }

    #[test]
    fn test_name_with_accent_or_punctuation_rejected() {
        for name in ["José Pérez", "Kevin, Chavez", "Ana-Maria"] {
            let mut form = PaymentForm::example();
            form.beneficiary_name = name.to_string();
            let errors = errors_for(serde_json::to_value(&form).unwrap());
            assert_eq!(
                errors["nombreBeneficiario"],
                vec!["El nombre no debe contener caracteres especiales"]
            );
        }
    }

    #[test]
    fn test_empty_name_reports_pattern_and_required() {
        let mut form = PaymentForm::example();
        form.beneficiary_name.clear();
        let errors = errors_for(serde_json::to_value(&form).unwrap());
        assert_eq!(
            errors["nombreBeneficiario"],
            vec![
                "El nombre no debe contener caracteres especiales",
                "El nombre del beneficiario es requerido"
            ]
        );
    }

    #[test]
    fn test_unknown_estilo_rejected() {
        let errors = errors_for(json!({
            "encabezado": "X",
            "clabe": "012180001234567891",
            "nombreBeneficiario": "Ana",
            "estilo": "retro"
        }));
        assert_eq!(errors["estilo"], vec!["El estilo debe ser 'neutral' o 'garage'"]);
    }

    #[test]
    fn test_all_fields_reported_in_form_order() {
        let errors = errors_for(json!({}));
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["encabezado", "clabe", "nombreBeneficiario"]);
    }

    #[test]
    fn test_numeric_clabe_is_not_coerced() {
        let errors = errors_for(json!({
            "encabezado": "X",
            "clabe": 12,
            "nombreBeneficiario": "Ana"
        }));
        assert_eq!(errors["clabe"], vec!["La CLABE debe ser texto"]);
    }

    #[test]
    fn test_into_record_nests_bank_info() {
        let record = PaymentForm::example().into_record();
        assert_eq!(record.routing_code(), "000000000000000000");
        assert_eq!(record.beneficiary_name(), "Kevin Chavez");
        assert_eq!(record.header, "Cafe Ejemplar");
    }
}
