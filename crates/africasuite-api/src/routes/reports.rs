use axum::extract::State;
use axum::http::header::{HeaderName, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::Artifact;
use africasuite_core::models::template::OutputFormat;
use africasuite_reports::BatchRequest;

use crate::error::ApiError;
use crate::state::AppState;

const REPORT_ID: HeaderName = HeaderName::from_static("x-report-id");
const REPORT_CACHED: HeaderName = HeaderName::from_static("x-report-cached");
const SAVED_PATH: HeaderName = HeaderName::from_static("x-saved-path");

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub template_id: String,
    #[serde(default)]
    pub parameters: ParameterValues,
    pub format: Option<OutputFormat>,
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Also write the artifact to the configured output directory.
    #[serde(default)]
    pub save: bool,
}

fn default_true() -> bool {
    true
}

/// Artifact bytes with download headers.
pub fn artifact_response(artifact: &Artifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let mut response = artifact.bytes.clone().into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(artifact.content_type()));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(CONTENT_DISPOSITION, value);
    }
    response
}

/// Generate a report synchronously and return the file.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    let output = state
        .service
        .generate_report(&req.template_id, req.parameters, req.format, req.use_cache)
        .await?;

    let mut response = artifact_response(&output.artifact);
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&output.report.id.to_string()) {
        headers.insert(REPORT_ID, value);
    }
    headers.insert(
        REPORT_CACHED,
        HeaderValue::from_static(if output.cached { "true" } else { "false" }),
    );

    if req.save {
        let path = state
            .service
            .save_report(&output.report, &output.artifact, None)
            .await?;
        if let Ok(value) = HeaderValue::from_str(&path.display().to_string()) {
            response.headers_mut().insert(SAVED_PATH, value);
        }
    }

    Ok(response)
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Ok {
        template_id: String,
        report_id: Uuid,
        file_name: String,
        format: OutputFormat,
        size: usize,
        cached: bool,
    },
    Error {
        template_id: String,
        error: String,
    },
}

/// Generate several reports; one failure does not fail the batch.
pub async fn generate_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<BatchRequest>>,
) -> Json<Vec<BatchOutcome>> {
    let template_ids: Vec<String> = requests.iter().map(|r| r.template_id.clone()).collect();
    let results = state.service.generate_batch_reports(requests).await;

    let outcomes = template_ids
        .into_iter()
        .zip(results)
        .map(|(template_id, result)| match result {
            Ok(output) => BatchOutcome::Ok {
                template_id,
                report_id: output.report.id,
                file_name: output.artifact.file_name.clone(),
                format: output.artifact.format,
                size: output.artifact.len(),
                cached: output.cached,
            },
            Err(e) => BatchOutcome::Error {
                template_id,
                error: e.to_string(),
            },
        })
        .collect();
    Json(outcomes)
}
