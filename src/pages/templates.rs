//! Page templates, compiled into the binary

use anyhow::{Context, Result};
use tera::Tera;

const BASE: &str = include_str!("../../templates/base.html");
const FORM: &str = include_str!("../../templates/form.html");
const VIEWER: &str = include_str!("../../templates/viewer.html");

/// Alternate theme stylesheet served at `/garage.css`
pub const GARAGE_CSS: &str = include_str!("../../static/garage.css");

/// Compile every page template
///
/// Names end in `.html`, so Tera escapes interpolated values.
pub fn load() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE),
        ("form.html", FORM),
        ("viewer.html", VIEWER),
    ])
    .context("Failed to compile page templates")?;
    Ok(tera)
}
