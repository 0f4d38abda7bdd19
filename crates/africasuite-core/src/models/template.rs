use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use super::parameter::{Parameter, ParameterValues};
use super::schedule::ReportSchedule;
use crate::error::CoreError;

/// Kind-specific section configuration. Only the renderer interprets it.
pub type SectionConfig = BTreeMap<String, serde_json::Value>;

/// Static description of a report: what it contains and what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    pub default_format: OutputFormat,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub styling: TemplateStyling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ReportSchedule>,
}

impl ReportTemplate {
    /// Sections sorted by `order`. Ties keep their declaration order.
    pub fn sections_in_order(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check that every required parameter has a non-null value.
    ///
    /// Reports the first missing parameter in declaration order.
    pub fn require_parameters(&self, values: &ParameterValues) -> Result<(), CoreError> {
        for param in self.parameters.iter().filter(|p| p.required) {
            match values.get(&param.name) {
                None | Some(serde_json::Value::Null) => {
                    return Err(CoreError::MissingParameter(param.name.clone()));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Fill declared defaults for optional parameters the caller left out.
    ///
    /// Required parameters are never defaulted; they must come from the caller.
    pub fn resolve_parameters(&self, mut values: ParameterValues) -> ParameterValues {
        for param in self.parameters.iter().filter(|p| !p.required) {
            if let Some(default) = &param.default
                && !values.contains_key(&param.name)
            {
                values.insert(param.name.clone(), default.clone());
            }
        }
        values
    }
}

/// One renderable block of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub order: i32,
    pub kind: SectionKind,
    #[serde(default)]
    pub config: SectionConfig,
}

impl Section {
    pub fn new(id: &str, title: &str, order: i32, kind: SectionKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            order,
            kind,
            config: SectionConfig::new(),
        }
    }

    pub fn with_config(mut self, key: &str, value: serde_json::Value) -> Self {
        self.config.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionKind {
    /// KPI grid: label/value pairs in a fixed column count.
    Summary,
    /// Fixed-column table over a row slice of the report data.
    Table,
    /// Chart placeholder.
    Chart,
    /// Free-text insight block.
    Insight,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Table => "table",
            SectionKind::Chart => "chart",
            SectionKind::Insight => "insight",
        }
    }
}

impl FromStr for SectionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" | "kpi" | "kpi_grid" => Ok(SectionKind::Summary),
            "table" => Ok(SectionKind::Table),
            "chart" => Ok(SectionKind::Chart),
            "insight" | "text" => Ok(SectionKind::Insight),
            other => Err(CoreError::UnsupportedSectionKind(other.to_string())),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TemplateCategory {
    Financial,
    Occupancy,
    Guest,
    FoodBeverage,
    MobileMoney,
    NightAudit,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Financial => "financial",
            TemplateCategory::Occupancy => "occupancy",
            TemplateCategory::Guest => "guest",
            TemplateCategory::FoodBeverage => "food_beverage",
            TemplateCategory::MobileMoney => "mobile_money",
            TemplateCategory::NightAudit => "night_audit",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The artifact formats the renderer can produce.
///
/// Deserializes through [`FromStr`], so file extensions (`docx`, `xlsx`) and
/// the legacy `pdf`/`excel` names are accepted wherever a format is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OutputFormat {
    /// Paginated document (DOCX).
    Document,
    /// Spreadsheet workbook (XLSX).
    Spreadsheet,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Document => "document",
            OutputFormat::Spreadsheet => "spreadsheet",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Document => "docx",
            OutputFormat::Spreadsheet => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Document => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "docx" | "pdf" => Ok(OutputFormat::Document),
            "spreadsheet" | "xlsx" | "excel" => Ok(OutputFormat::Spreadsheet),
            _ => Err(CoreError::UnknownFormat(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmetic theme carried by a template. Colors are `RRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateStyling {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    /// Decorative motif tags (e.g. "kente", "adinkra"). Opaque.
    #[serde(default)]
    pub motifs: Vec<String>,
}

impl Default for TemplateStyling {
    fn default() -> Self {
        Self {
            primary_color: "C65D07".to_string(),
            secondary_color: "2D5016".to_string(),
            accent_color: "F4A300".to_string(),
            motifs: Vec::new(),
        }
    }
}
