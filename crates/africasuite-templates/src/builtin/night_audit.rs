use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::schedule::{ReportSchedule, ScheduleFrequency};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

/// End-of-day audit: revenue posted, room status and folio discrepancies.
pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "night_audit".to_string(),
        name: "Audit de Nuit".to_string(),
        description: "End-of-day closing: revenue posted, room status and discrepancies."
            .to_string(),
        category: TemplateCategory::NightAudit,
        default_format: OutputFormat::Spreadsheet,
        sections: vec![
            Section::new("kpis", "Closing Figures", 1, SectionKind::Summary)
                .with_config("columns", json!(3))
                .with_config(
                    "metrics",
                    json!([
                        field("audit.room_revenue", "Room Revenue", "currency"),
                        field("audit.other_revenue", "Other Revenue", "currency"),
                        field("audit.total_revenue", "Total Posted", "currency"),
                        field("audit.rooms_occupied", "Rooms Occupied", "number"),
                        field("audit.no_shows", "No-shows", "number"),
                    ]),
                ),
            Section::new("discrepancies", "Folio Discrepancies", 2, SectionKind::Table)
                .with_config("data_key", json!("discrepancies"))
                .with_config(
                    "columns",
                    json!([
                        field("folio", "Folio", "text"),
                        field("description", "Description", "text"),
                        field("amount", "Amount", "currency"),
                    ]),
                ),
            Section::new("notes", "Auditor Notes", 3, SectionKind::Insight)
                .with_config("data_key", json!("notes")),
        ],
        parameters: vec![
            Parameter::new("date", "Audit date", ParameterKind::Date).required(),
            Parameter::new("auditor", "Auditor", ParameterKind::FreeText),
        ],
        styling: styling("3B2F2F", "C0A062", "7B3F00", &["adinkra"]),
        schedule: Some(ReportSchedule {
            frequency: ScheduleFrequency::Daily,
            time: "02:00".to_string(),
            enabled: true,
        }),
    }
}
