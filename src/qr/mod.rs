//! QR code rendering for payment links
//!
//! The link is rendered as an SVG for on-screen display and can be exported
//! as an opaque PNG of the same dimensions.

use crate::core::error::RenderError;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops};
use qrcode::QrCode;
use qrcode::render::{svg, unicode};
use serde::{Deserialize, Serialize};

/// Filename offered when the PNG is downloaded
pub const EXPORT_FILENAME: &str = "qr-code.png";

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Options for QR code generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrOptions {
    /// Minimum rendered width/height in pixels
    #[serde(default = "default_size")]
    pub size: u32,

    /// Surround the symbol with the standard 4-module margin
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: bool,
}

fn default_size() -> u32 {
    200
}

fn default_quiet_zone() -> bool {
    true
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: default_size(),
            quiet_zone: default_quiet_zone(),
        }
    }
}

/// A rendered-on-demand QR symbol
pub struct QrImage {
    code: QrCode,
    options: QrOptions,
}

impl QrImage {
    /// Encode `data` into a QR symbol
    pub fn new(data: &str, options: &QrOptions) -> Result<Self, RenderError> {
        let code = QrCode::new(data.as_bytes()).map_err(|e| RenderError::DataTooLong {
            length: data.len(),
            message: e.to_string(),
        })?;

        Ok(Self {
            code,
            options: options.clone(),
        })
    }

    /// Modules per side, without the quiet zone
    pub fn modules(&self) -> usize {
        self.code.width()
    }

    /// SVG markup for screen display
    pub fn svg(&self) -> String {
        self.code
            .render()
            .min_dimensions(self.options.size, self.options.size)
            .quiet_zone(self.options.quiet_zone)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }

    /// Block-character rendering for terminals
    pub fn terminal(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .quiet_zone(self.options.quiet_zone)
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build()
    }

    /// Symbol with transparent light modules, at the SVG's dimensions
    fn raster(&self) -> RgbaImage {
        self.code
            .render::<Rgba<u8>>()
            .min_dimensions(self.options.size, self.options.size)
            .quiet_zone(self.options.quiet_zone)
            .dark_color(DARK)
            .light_color(CLEAR)
            .build()
    }

    /// Opaque PNG export
    ///
    /// The symbol is drawn onto a white canvas of the same size so the file
    /// carries no transparency.
    pub fn png(&self) -> Result<Vec<u8>, RenderError> {
        let symbol = self.raster();
        let (width, height) = symbol.dimensions();

        let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
        imageops::overlay(&mut canvas, &symbol, 0, 0);
        let flat = DynamicImage::ImageRgba8(canvas).to_rgb8();

        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(flat.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| RenderError::Png {
                message: e.to_string(),
            })?;

        tracing::debug!(width, height, bytes = bytes.len(), "Exported QR code");

        Ok(bytes)
    }

    /// PNG export as a `data:` URI, for download links embedded in pages
    pub fn png_data_uri(&self) -> Result<String, RenderError> {
        let png = self.png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
    }
}
