//! HTTP handlers for the encode/decode API

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::codec::{decode_payload, payload_param};
use crate::core::error::PagoError;
use crate::core::record::PaymentRecord;
use crate::core::validation::{PaymentForm, Validated};
use crate::pages::AppState;
use crate::pages::encoder::encode_form;
use crate::qr::EXPORT_FILENAME;

/// Response for the encode endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    /// Full viewer link
    pub url: String,
    /// Base64 payload, before percent-encoding
    pub payload: String,
    /// QR code of `url` as SVG markup
    pub svg: String,
}

/// POST /api/encode
pub async fn encode(
    State(state): State<AppState>,
    Validated(form): Validated<PaymentForm>,
) -> Result<Json<EncodeResponse>, PagoError> {
    let (link, qr) = encode_form(&state.config, form)?;

    Ok(Json(EncodeResponse {
        svg: qr.svg(),
        url: link.url,
        payload: link.payload,
    }))
}

/// POST /api/encode/png
///
/// Responds with the PNG export as an attachment named `qr-code.png`.
pub async fn encode_png(
    State(state): State<AppState>,
    Validated(form): Validated<PaymentForm>,
) -> Result<Response, PagoError> {
    let (_, qr) = encode_form(&state.config, form)?;
    let png = qr.png()?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        ),
    ];

    Ok((headers, png).into_response())
}

/// GET /api/decode?q=
///
/// The record is returned as decoded; rule violations are logged, not rejected.
pub async fn decode(
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaymentRecord>, PagoError> {
    let record = decode_payload(payload_param(&pairs))?;

    let anomalies = record.anomalies();
    if !anomalies.is_empty() {
        tracing::warn!(anomalies = ?anomalies, "Decoded record breaks form rules");
    }

    Ok(Json(record))
}
