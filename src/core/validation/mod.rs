//! Validation and filtering system
//!
//! Encoder input goes through a declarative set of filters and validators
//! before anything is serialized. The same rules are reused to flag decoded
//! records that could not have come out of the form.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod form;
pub mod validators;

pub use config::{FieldErrors, FormValidationConfig};
pub use extractor::{ValidatableForm, Validated};
pub use form::{BENEFICIARY_NAME_MAX, PaymentForm, ROUTING_CODE_LEN, payment_form_rules};
