use thiserror::Error;

use africasuite_core::error::CoreError;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("invalid template file {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
