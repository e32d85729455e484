//! Axum extractor for validated forms
//!
//! This module provides the `Validated<T>` extractor that filters and
//! validates a JSON request body before it reaches handlers.

use super::config::FormValidationConfig;
use crate::core::error::{PagoError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for forms that carry a validation configuration
pub trait ValidatableForm: DeserializeOwned {
    fn validation_rules() -> &'static FormValidationConfig;
}

/// Axum extractor that validates and filters a form submitted as JSON
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn encode(
///     Validated(form): Validated<PaymentForm>,
/// ) -> Result<Json<EncodeResponse>, PagoError> {
///     // form already passed every rule
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableForm + Send,
{
    type Rejection = PagoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidBody {
                message: e.body_text(),
            })?;

        let filtered = T::validation_rules()
            .validate_and_filter(payload)
            .map_err(|errors| {
                tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Form rejected");
                ValidationError::FieldErrors(errors)
            })?;

        let form = serde_json::from_value(filtered).map_err(|e| ValidationError::InvalidBody {
            message: e.to_string(),
        })?;

        Ok(Validated(form))
    }
}
