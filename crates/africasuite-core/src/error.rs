use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    #[error("unsupported section kind: {0}")]
    UnsupportedSectionKind(String),

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("unknown job priority: {0}")]
    UnknownPriority(String),
}
