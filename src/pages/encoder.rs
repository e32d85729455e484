//! Encoder form page
//!
//! The form posts back to itself. A valid submission re-renders the page with
//! the QR code, a preview link and a download button; an invalid one
//! re-renders with the messages under each field and nothing encoded.

use super::AppState;
use crate::config::AppConfig;
use crate::core::codec::{PaymentLink, encode_link};
use crate::core::error::{PagoError, RenderError, ValidationError};
use crate::core::validation::{FieldErrors, PaymentForm, payment_form_rules};
use crate::qr::{EXPORT_FILENAME, QrImage};
use crate::viewer::Stylesheet;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tera::Context;

/// Query accepted by the form page
#[derive(Debug, Default, Deserialize)]
pub struct EncoderQuery {
    /// `1` or `true` prefills the sample merchant
    pub ejemplo: Option<String>,
}

impl EncoderQuery {
    fn wants_example(&self) -> bool {
        matches!(self.ejemplo.as_deref(), Some("1" | "true"))
    }
}

/// Encode a validated form into its link and QR symbol
pub fn encode_form(
    config: &AppConfig,
    form: PaymentForm,
) -> Result<(PaymentLink, QrImage), RenderError> {
    let record = form.into_record();
    let link = encode_link(&record, &config.origin);
    let qr = QrImage::new(&link.url, &config.qr)?;

    tracing::debug!(
        style = %record.style,
        payload_len = link.payload.len(),
        modules = qr.modules(),
        "Encoded payment link"
    );

    Ok((link, qr))
}

/// What the result section of the page shows
struct Encoded {
    link: PaymentLink,
    svg: String,
    png_uri: String,
}

/// Raw submitted values for every declared field, missing ones as ""
fn submitted_values(raw: &HashMap<String, String>) -> Value {
    let values: Map<String, Value> = payment_form_rules()
        .field_names()
        .map(|field| {
            let value = raw.get(field).cloned().unwrap_or_default();
            (field.to_string(), Value::String(value))
        })
        .collect();
    Value::Object(values)
}

fn page_context(form: &Value, errors: &FieldErrors, encoded: Option<&Encoded>) -> Context {
    // every field gets a (possibly empty) list so templates can iterate blindly
    let mut all_errors: FieldErrors = payment_form_rules()
        .field_names()
        .map(|field| (field.to_string(), Vec::new()))
        .collect();
    for (field, messages) in errors {
        all_errors.insert(field.clone(), messages.clone());
    }

    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", &all_errors);
    context.insert("link", &encoded.map(|e| &e.link));
    context.insert("svg", &encoded.map(|e| e.svg.as_str()));
    context.insert("png_uri", &encoded.map(|e| e.png_uri.as_str()));
    context.insert("download_name", EXPORT_FILENAME);
    context.insert("stylesheets", &Vec::<Stylesheet>::new());
    context.insert("page_class", "");
    context
}

fn form_value(form: &PaymentForm) -> Result<Value, PagoError> {
    serde_json::to_value(form).map_err(|e| PagoError::Internal(e.to_string()))
}

/// GET / - empty form, or the sample with `?ejemplo=1`
pub async fn encoder_page(
    State(state): State<AppState>,
    Query(query): Query<EncoderQuery>,
) -> Result<Html<String>, PagoError> {
    let form = if query.wants_example() {
        PaymentForm::example()
    } else {
        PaymentForm::default()
    };

    state.render(
        "form.html",
        &page_context(&form_value(&form)?, &FieldErrors::new(), None),
    )
}

/// POST / - validate the submission and show the result
pub async fn submit_form(
    State(state): State<AppState>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, PagoError> {
    let submitted = submitted_values(&raw);

    let form = match PaymentForm::validate(submitted.clone()) {
        Ok(form) => form,
        Err(ValidationError::FieldErrors(errors)) => {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Form rejected");
            let page = state.render("form.html", &page_context(&submitted, &errors, None))?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let shown = form_value(&form)?;
    let (link, qr) = encode_form(&state.config, form)?;
    let encoded = Encoded {
        svg: qr.svg(),
        png_uri: qr.png_data_uri()?,
        link,
    };

    let page = state.render(
        "form.html",
        &page_context(&shown, &FieldErrors::new(), Some(&encoded)),
    )?;
    Ok(page.into_response())
}
