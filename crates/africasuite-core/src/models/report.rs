use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::parameter::ParameterValues;
use super::template::OutputFormat;

/// A synthesized report: the data payload plus who, when and for what period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedReport {
    pub id: Uuid,
    pub template_id: String,
    pub title: String,
    pub format: OutputFormat,
    pub parameters: ParameterValues,
    /// Opaque to the pipeline; consumed by the renderer only.
    pub data: serde_json::Value,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportMetadata {
    pub generated_at: jiff::Timestamp,
    pub generated_by: String,
    /// Human-readable summary of the period covered, e.g. `2024-01-01 to 2024-01-31`.
    pub date_range: String,
    pub currency: String,
    pub organization: String,
}

/// Rendered bytes of a report in one output format.
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: OutputFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("format", &self.format)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
