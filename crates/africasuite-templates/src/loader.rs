//! JSON template files.
//!
//! Section kinds arrive as plain strings in these files. They are converted
//! to [`SectionKind`] here, so an unknown kind is rejected at load time and a
//! registered template always has a kind the renderer implements.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use africasuite_core::models::parameter::Parameter;
use africasuite_core::models::schedule::ReportSchedule;
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionConfig, SectionKind, TemplateCategory,
    TemplateStyling,
};

use crate::error::TemplateError;

#[derive(Debug, Deserialize)]
struct TemplateFile {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    category: TemplateCategory,
    default_format: OutputFormat,
    sections: Vec<SectionFile>,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(default)]
    styling: TemplateStyling,
    #[serde(default)]
    schedule: Option<ReportSchedule>,
}

#[derive(Debug, Deserialize)]
struct SectionFile {
    id: String,
    title: String,
    order: i32,
    kind: String,
    #[serde(default)]
    config: SectionConfig,
}

/// Parse one template definition.
pub fn parse_template(json: &str) -> Result<ReportTemplate, TemplateError> {
    let file: TemplateFile = serde_json::from_str(json).map_err(|e| TemplateError::Parse {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })?;
    into_template(file)
}

/// Load every `*.json` file in `dir`, sorted by file name.
pub fn load_dir(dir: &Path) -> Result<Vec<ReportTemplate>, TemplateError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = std::fs::read_to_string(&path)?;
        let file: TemplateFile =
            serde_json::from_str(&contents).map_err(|e| TemplateError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        templates.push(into_template(file)?);
    }
    Ok(templates)
}

fn into_template(file: TemplateFile) -> Result<ReportTemplate, TemplateError> {
    let sections = file
        .sections
        .into_iter()
        .map(|s| -> Result<Section, TemplateError> {
            Ok(Section {
                kind: SectionKind::from_str(&s.kind)?,
                id: s.id,
                title: s.title,
                order: s.order,
                config: s.config,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportTemplate {
        id: file.id,
        name: file.name,
        description: file.description,
        category: file.category,
        default_format: file.default_format,
        sections,
        parameters: file.parameters,
        styling: file.styling,
        schedule: file.schedule,
    })
}
