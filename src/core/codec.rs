//! Link codec
//!
//! ```text
//! PaymentRecord ──serde_json──▶ JSON ──base64──▶ payload ──percent-encode──▶ <origin>/qr?q=…
//! ```
//!
//! Decoding reverses the steps in the same order. Any input that does not
//! survive the reversal is reported as [`DecodeError::InvalidFormat`].

use super::error::DecodeError;
use super::record::PaymentRecord;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Serialize;

/// Path of the viewer page
pub const VIEWER_PATH: &str = "/qr";

/// The single query parameter carrying the payload
pub const PAYLOAD_PARAM: &str = "q";

/// Accepts payloads whose `=` padding was stripped in transit
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A shareable link and the payload it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLink {
    /// Absolute viewer URL
    pub url: String,
    /// Base64 payload, before percent-encoding
    pub payload: String,
}

/// Serialize a record to its base64 payload
pub fn encode_payload(record: &PaymentRecord) -> String {
    // Serializing plain strings and a unit enum cannot fail.
    let json = serde_json::to_string(record).unwrap_or_default();
    STANDARD.encode(json.as_bytes())
}

/// Build the viewer link for a record
///
/// `origin` is the public base URL (scheme, host, optional port); a trailing
/// slash is tolerated.
pub fn encode_link(record: &PaymentRecord, origin: &str) -> PaymentLink {
    let payload = encode_payload(record);
    let url = format!(
        "{}{}?{}={}",
        origin.trim_end_matches('/'),
        VIEWER_PATH,
        PAYLOAD_PARAM,
        urlencoding::encode(&payload)
    );

    PaymentLink { url, payload }
}

/// Turn a `q` value back into a record
///
/// `raw` is the query value after percent-decoding, or `None` when the
/// parameter was absent. No form rules are re-applied to the result.
pub fn decode_payload(raw: Option<&str>) -> Result<PaymentRecord, DecodeError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(DecodeError::NoCode),
    };

    // Query decoding turns a literal '+' into a space; base64 never contains spaces.
    let restored = raw.replace(' ', "+");

    let bytes = LENIENT
        .decode(restored.trim().as_bytes())
        .map_err(DecodeError::invalid)?;
    let json = String::from_utf8(bytes).map_err(DecodeError::invalid)?;

    serde_json::from_str(&json).map_err(DecodeError::invalid)
}

/// The first `q` value among decoded query pairs
///
/// Repeated parameters are not an error: later values are ignored.
pub fn payload_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == PAYLOAD_PARAM)
        .map(|(_, value)| value.as_str())
}

/// Reverse only the percent-encoding step of a raw query value
pub fn percent_decode(value: &str) -> Result<String, DecodeError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(DecodeError::invalid)
}
