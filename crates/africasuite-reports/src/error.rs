use thiserror::Error;
use uuid::Uuid;

use africasuite_core::error::CoreError;
use africasuite_export::error::ExportError;
use africasuite_templates::error::TemplateError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("job not found: {0}")]
    JobNotFound(Uuid),

    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    #[error("render failed: {0}")]
    Render(#[from] ExportError),

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("generation task failed: {0}")]
    TaskFailed(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for ReportError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MissingParameter(name) => ReportError::MissingParameter(name),
            other => ReportError::DataSource(other.to_string()),
        }
    }
}

impl From<TemplateError> for ReportError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::NotFound(id) => ReportError::TemplateNotFound(id),
            other => ReportError::Template(other.to_string()),
        }
    }
}
