//! Built-in AfricaSuite hotel reports.
//!
//! Section config conventions read by the renderer:
//! - `summary`: `columns` (grid width) and `metrics`, a list of
//!   `{ key, label, format }` where `key` is a dotted path into the data.
//! - `table`: `data_key` naming an array of row objects, and `columns`, a
//!   list of `{ key, label, format }`.
//! - `chart`: `chart_type`, `data_key` and an optional `caption`.
//! - `insight`: `data_key` naming a string or an array of strings, or a
//!   literal `text`.

pub mod financial_daily;
pub mod guest_analytics;
pub mod mobile_money;
pub mod night_audit;
pub mod occupancy;
pub mod pos_sales;

use serde_json::{json, Value};

use africasuite_core::models::template::{ReportTemplate, TemplateStyling};

/// Every built-in template, in display order.
pub fn all_templates() -> Vec<ReportTemplate> {
    vec![
        financial_daily::template(),
        occupancy::template(),
        guest_analytics::template(),
        pos_sales::template(),
        mobile_money::template(),
        night_audit::template(),
    ]
}

/// A KPI or table column entry: `{ key, label, format }`.
pub(crate) fn field(key: &str, label: &str, format: &str) -> Value {
    json!({ "key": key, "label": label, "format": format })
}

pub(crate) fn styling(primary: &str, secondary: &str, accent: &str, motifs: &[&str]) -> TemplateStyling {
    TemplateStyling {
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
        accent_color: accent.to_string(),
        motifs: motifs.iter().map(|m| m.to_string()).collect(),
    }
}
