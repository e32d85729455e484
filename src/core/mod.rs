//! Core module: the payment record, its link codec and form validation

pub mod codec;
pub mod error;
pub mod record;
pub mod validation;

pub use codec::{PaymentLink, decode_payload, encode_link, encode_payload};
pub use error::{ConfigError, DecodeError, PagoError, RenderError, ValidationError};
pub use record::{BankInfo, PaymentRecord, StyleVariant};
pub use validation::{PaymentForm, Validated};
