use serde::{Deserialize, Serialize};

use africasuite_core::models::template::TemplateStyling;

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Calibri").
    pub body_font: String,

    /// Font for headings (e.g. "Georgia").
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Report title font size in points.
    pub heading1_size: usize,

    /// Section heading font size in points.
    pub heading2_size: usize,

    /// Footer and caption font size in points.
    pub small_size: usize,

    /// Character repeated to draw the decorative band under the header.
    pub motif_glyph: char,

    /// How many times the motif glyph repeats across the band.
    pub motif_width: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Georgia".to_string(),
            body_size: 11,
            heading1_size: 20,
            heading2_size: 14,
            small_size: 8,
            motif_glyph: '\u{25C6}',
            motif_width: 24,
        }
    }
}

/// Colors taken from a template's styling, normalized to `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Palette {
    pub fn from_styling(styling: &TemplateStyling) -> Self {
        let fallback = TemplateStyling::default();
        Self {
            primary: normalize_hex(&styling.primary_color).unwrap_or(fallback.primary_color),
            secondary: normalize_hex(&styling.secondary_color).unwrap_or(fallback.secondary_color),
            accent: normalize_hex(&styling.accent_color).unwrap_or(fallback.accent_color),
        }
    }
}

/// `#c65d07` or `C65D07` → `C65D07`. Anything else → `None`.
pub fn normalize_hex(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_uppercase())
    } else {
        None
    }
}

/// Parse a normalized `RRGGBB` string into its numeric value.
pub fn hex_to_rgb(hex: &str) -> u32 {
    u32::from_str_radix(hex, 16).unwrap_or(0)
}
