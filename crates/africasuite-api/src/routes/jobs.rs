use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use africasuite_core::models::job::{GenerationJob, JobPriority, JobStatus};
use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::template::OutputFormat;

use crate::error::ApiError;
use crate::routes::reports::artifact_response;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EnqueueRequest {
    pub template_id: String,
    #[serde(default)]
    pub parameters: ParameterValues,
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub priority: JobPriority,
}

#[derive(Serialize)]
pub struct EnqueueResponse {
    pub job_id: Uuid,
}

#[derive(Serialize)]
pub struct JobSummary {
    id: Uuid,
    template_id: String,
    format: OutputFormat,
    priority: JobPriority,
    status: JobStatus,
    created_at: String,
    error: Option<String>,
}

impl From<GenerationJob> for JobSummary {
    fn from(job: GenerationJob) -> Self {
        Self {
            id: job.id,
            template_id: job.template_id,
            format: job.format,
            priority: job.priority,
            status: job.status,
            created_at: job.created_at.to_string(),
            error: job.error,
        }
    }
}

pub async fn enqueue_job(
    State(state): State<AppState>,
    Json(req): Json<EnqueueRequest>,
) -> Result<Json<EnqueueResponse>, ApiError> {
    let job_id = state
        .service
        .queue_report_generation(&req.template_id, req.parameters, req.format, req.priority)
        .await?;
    Ok(Json(EnqueueResponse { job_id }))
}

pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobSummary>> {
    let jobs = state.service.list_jobs().await;
    Json(jobs.into_iter().map(JobSummary::from).collect())
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerationJob>, ApiError> {
    Ok(Json(state.service.get_job_status(id).await?))
}

/// The job's artifact, or 404 until it has completed.
pub async fn get_job_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match state.service.get_job_result(id).await? {
        Some(artifact) => Ok(artifact_response(&artifact)),
        None => {
            let status = state.service.get_job_status(id).await?.status;
            Err(ApiError::NotFound(format!(
                "job {id} has no result (status: {status})"
            )))
        }
    }
}
