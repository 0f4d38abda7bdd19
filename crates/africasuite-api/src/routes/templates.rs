use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use africasuite_core::models::template::{OutputFormat, ReportTemplate, TemplateCategory};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TemplateQuery {
    category: Option<TemplateCategory>,
}

#[derive(Serialize)]
pub struct TemplateSummary {
    id: String,
    name: String,
    description: String,
    category: TemplateCategory,
    default_format: OutputFormat,
    sections: usize,
}

pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Json<Vec<TemplateSummary>> {
    let templates = state
        .service
        .list_templates()
        .iter()
        .filter(|t| query.category.is_none_or(|c| t.category == c))
        .map(|t| TemplateSummary {
            id: t.id.clone(),
            name: t.name.clone(),
            description: t.description.clone(),
            category: t.category,
            default_format: t.default_format,
            sections: t.sections.len(),
        })
        .collect();
    Json(templates)
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportTemplate>, ApiError> {
    let template = state.service.get_template(&id)?;
    Ok(Json(template.clone()))
}
