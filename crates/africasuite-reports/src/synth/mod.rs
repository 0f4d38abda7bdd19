//! Report data synthesis.
//!
//! [`DataSource`] is the seam between the pipeline and wherever report data
//! comes from. The bundled [`mock::MockDataSource`] fabricates plausible hotel
//! figures; a real implementation would query the PMS stores instead, and
//! must produce the same shape per template category so the renderer keeps
//! working.

pub mod mock;

use std::future::Future;

use serde_json::Value;

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::template::ReportTemplate;

use crate::error::ReportError;

pub use mock::MockDataSource;

pub trait DataSource: Send + Sync + 'static {
    /// Produce the data payload for `template`.
    ///
    /// Implementations must fail with [`ReportError::MissingParameter`] when
    /// a required parameter is absent; [`ReportTemplate::require_parameters`]
    /// does that check.
    fn synthesize(
        &self,
        template: &ReportTemplate,
        parameters: &ParameterValues,
    ) -> impl Future<Output = Result<Value, ReportError>> + Send;
}

/// `"2024-01-15"`, `"2024-01-01 to 2024-01-31"`, or `"n/a"`.
pub fn summarize_period(parameters: &ParameterValues) -> String {
    if let Some(date) = parameters.get("date").and_then(Value::as_str) {
        return date.to_string();
    }
    if let Some(range) = parameters.get("date_range") {
        let start = range.get("start").and_then(Value::as_str);
        let end = range.get("end").and_then(Value::as_str);
        match (start, end) {
            (Some(start), Some(end)) => return format!("{start} to {end}"),
            (Some(start), None) => return format!("from {start}"),
            (None, Some(end)) => return format!("until {end}"),
            (None, None) => {}
        }
    }
    "n/a".to_string()
}
