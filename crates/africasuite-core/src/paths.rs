//! Artifact file naming conventions.
//!
//! Pure string functions, no filesystem access. These define how a rendered
//! report is named when it is downloaded or saved.

use jiff::civil::Date;

use crate::models::template::OutputFormat;

/// Lowercase ASCII slug: alphanumerics kept, every other run of characters
/// collapsed into a single `_`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("report");
    }
    slug
}

/// `<slug>_<YYYY-MM-DD>.<ext>`
pub fn report_file_name(title: &str, date: Date, format: OutputFormat) -> String {
    format!("{}_{date}.{}", slugify(title), format.extension())
}
