//! Format-independent report layout.
//!
//! The layout is built once from a template and a generated report, then
//! handed to an encoder. Every per-kind section rule lives here, so the DOCX
//! and XLSX encoders only decide how blocks look, never what they contain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use africasuite_core::models::report::GeneratedReport;
use africasuite_core::models::template::{ReportTemplate, Section, SectionKind};

use crate::error::ExportError;
use crate::format::{format_value, lookup, Cell, ValueFormat};
use crate::styles::Palette;

const DEFAULT_KPI_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub header: HeaderBlock,
    /// One block per template section, in render order.
    pub blocks: Vec<Block>,
    pub footer: String,
}

impl Layout {
    /// Section ids in the order they render.
    pub fn section_ids(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.section_id()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub title: String,
    pub organization: String,
    pub date_range: String,
    pub generated_at: String,
    pub generated_by: String,
    pub currency: String,
    pub palette: Palette,
    pub motifs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    KpiGrid {
        section_id: String,
        title: String,
        columns: usize,
        items: Vec<KpiItem>,
    },
    Table {
        section_id: String,
        title: String,
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
    ChartPlaceholder {
        section_id: String,
        title: String,
        chart_type: String,
        caption: Option<String>,
        points: usize,
    },
    Insight {
        section_id: String,
        title: String,
        paragraphs: Vec<String>,
    },
}

impl Block {
    pub fn section_id(&self) -> &str {
        match self {
            Block::KpiGrid { section_id, .. }
            | Block::Table { section_id, .. }
            | Block::ChartPlaceholder { section_id, .. }
            | Block::Insight { section_id, .. } => section_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Block::KpiGrid { title, .. }
            | Block::Table { title, .. }
            | Block::ChartPlaceholder { title, .. }
            | Block::Insight { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiItem {
    pub label: String,
    pub value: Cell,
}

#[derive(Debug, Deserialize)]
struct FieldSpec {
    key: String,
    label: String,
    #[serde(default)]
    format: ValueFormat,
}

#[derive(Debug, Deserialize)]
struct SummaryConfig {
    #[serde(default = "default_kpi_columns")]
    columns: usize,
    #[serde(default)]
    metrics: Vec<FieldSpec>,
}

fn default_kpi_columns() -> usize {
    DEFAULT_KPI_COLUMNS
}

#[derive(Debug, Deserialize)]
struct TableConfig {
    data_key: String,
    #[serde(default)]
    columns: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
struct ChartConfig {
    #[serde(default = "default_chart_type")]
    chart_type: String,
    #[serde(default)]
    data_key: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

fn default_chart_type() -> String {
    "bar".to_string()
}

#[derive(Debug, Deserialize)]
struct InsightConfig {
    #[serde(default)]
    data_key: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Build the layout for `report` rendered with `template`.
///
/// Sections render in ascending `order`; ties keep declaration order.
pub fn build_layout(
    template: &ReportTemplate,
    report: &GeneratedReport,
) -> Result<Layout, ExportError> {
    let meta = &report.metadata;
    let header = HeaderBlock {
        title: report.title.clone(),
        organization: meta.organization.clone(),
        date_range: meta.date_range.clone(),
        generated_at: meta.generated_at.strftime("%Y-%m-%d %H:%M UTC").to_string(),
        generated_by: meta.generated_by.clone(),
        currency: meta.currency.clone(),
        palette: Palette::from_styling(&template.styling),
        motifs: template.styling.motifs.clone(),
    };

    let blocks = template
        .sections_in_order()
        .into_iter()
        .map(|section| section_block(section, &report.data, &meta.currency))
        .collect::<Result<Vec<_>, _>>()?;

    let footer = format!(
        "{} \u{2022} {} \u{2022} AfricaSuite PMS",
        meta.organization, header.generated_at
    );

    Ok(Layout {
        header,
        blocks,
        footer,
    })
}

fn section_block(section: &Section, data: &Value, currency: &str) -> Result<Block, ExportError> {
    match section.kind {
        SectionKind::Summary => {
            let config: SummaryConfig = parse_config(section)?;
            if config.columns == 0 {
                return Err(invalid(section, "columns must be at least 1"));
            }
            let items = config
                .metrics
                .iter()
                .map(|m| KpiItem {
                    label: m.label.clone(),
                    value: format_value(lookup(data, &m.key), m.format, currency),
                })
                .collect();
            Ok(Block::KpiGrid {
                section_id: section.id.clone(),
                title: section.title.clone(),
                columns: config.columns,
                items,
            })
        }
        SectionKind::Table => {
            let config: TableConfig = parse_config(section)?;
            let rows = match lookup(data, &config.data_key) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(rows)) => rows
                    .iter()
                    .map(|row| {
                        config
                            .columns
                            .iter()
                            .map(|c| format_value(lookup(row, &c.key), c.format, currency))
                            .collect()
                    })
                    .collect(),
                Some(_) => {
                    return Err(invalid(
                        section,
                        &format!("data at '{}' is not a list of rows", config.data_key),
                    ));
                }
            };
            Ok(Block::Table {
                section_id: section.id.clone(),
                title: section.title.clone(),
                headers: config.columns.iter().map(|c| c.label.clone()).collect(),
                rows,
            })
        }
        SectionKind::Chart => {
            let config: ChartConfig = parse_config(section)?;
            let points = config
                .data_key
                .as_deref()
                .and_then(|key| lookup(data, key))
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            Ok(Block::ChartPlaceholder {
                section_id: section.id.clone(),
                title: section.title.clone(),
                chart_type: config.chart_type,
                caption: config.caption,
                points,
            })
        }
        SectionKind::Insight => {
            let config: InsightConfig = parse_config(section)?;
            let paragraphs = match (&config.data_key, &config.text) {
                (Some(key), _) => match lookup(data, key) {
                    Some(Value::String(s)) => vec![s.clone()],
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect(),
                    _ => Vec::new(),
                },
                (None, Some(text)) => vec![text.clone()],
                (None, None) => return Err(invalid(section, "needs either data_key or text")),
            };
            Ok(Block::Insight {
                section_id: section.id.clone(),
                title: section.title.clone(),
                paragraphs,
            })
        }
    }
}

fn parse_config<T: serde::de::DeserializeOwned>(section: &Section) -> Result<T, ExportError> {
    let object: Map<String, Value> = section
        .config
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::from_value(Value::Object(object)).map_err(|e| invalid(section, &e.to_string()))
}

fn invalid(section: &Section, message: &str) -> ExportError {
    ExportError::InvalidSectionConfig {
        section: section.id.clone(),
        message: message.to_string(),
    }
}
