use jiff::tz::TimeZone;
use tracing::debug;

use africasuite_core::models::report::{Artifact, GeneratedReport};
use africasuite_core::models::template::{OutputFormat, ReportTemplate};
use africasuite_core::paths;

use crate::error::ExportError;
use crate::layout::build_layout;
use crate::styles::DocumentStyles;
use crate::{docx, xlsx};

/// Render a generated report into an artifact of the requested format.
///
/// Deterministic for a given (template, report, format, styles): all the
/// randomness of a mock report lives in its data, never here.
pub fn render(
    template: &ReportTemplate,
    report: &GeneratedReport,
    format: OutputFormat,
    styles: &DocumentStyles,
) -> Result<Artifact, ExportError> {
    let layout = build_layout(template, report)?;

    let bytes = match format {
        OutputFormat::Document => docx::generate_docx(&layout, styles)?,
        OutputFormat::Spreadsheet => xlsx::generate_xlsx(&layout)?,
    };
    debug!(
        template_id = %template.id,
        report_id = %report.id,
        format = %format,
        bytes = bytes.len(),
        "report rendered"
    );

    let date = report.metadata.generated_at.to_zoned(TimeZone::UTC).date();
    Ok(Artifact {
        format,
        file_name: paths::report_file_name(&report.title, date, format),
        bytes,
    })
}
