use std::path::{Path, PathBuf};

use jiff::civil::Date;
use tracing::info;

use africasuite_core::models::report::{Artifact, GeneratedReport};
use africasuite_core::paths::report_file_name;

use crate::error::ReportError;

/// Write `artifact` under `dir` as `<slug>_<date>.<ext>`, creating `dir` if
/// needed. An existing file with the same name is replaced.
pub async fn save_artifact(
    dir: &Path,
    report: &GeneratedReport,
    artifact: &Artifact,
    date: Date,
) -> Result<PathBuf, ReportError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(report_file_name(&report.title, date, artifact.format));
    tokio::fs::write(&path, &artifact.bytes).await?;

    info!(
        report_id = %report.id,
        path = %path.display(),
        bytes = artifact.len(),
        "report saved"
    );
    Ok(path)
}
