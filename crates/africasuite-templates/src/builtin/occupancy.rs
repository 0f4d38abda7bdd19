use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

/// Occupancy, ADR and RevPAR over a period, by room type and by day.
pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "occupancy_report".to_string(),
        name: "Rapport d'Occupation".to_string(),
        description: "Occupancy rate, average daily rate and RevPAR over a period.".to_string(),
        category: TemplateCategory::Occupancy,
        default_format: OutputFormat::Document,
        sections: vec![
            Section::new("kpis", "Occupancy Indicators", 1, SectionKind::Summary)
                .with_config("columns", json!(4))
                .with_config(
                    "metrics",
                    json!([
                        field("occupancy.rate", "Occupancy", "percent"),
                        field("occupancy.adr", "ADR", "currency"),
                        field("occupancy.revpar", "RevPAR", "currency"),
                        field("occupancy.rooms_sold", "Room Nights Sold", "number"),
                    ]),
                ),
            Section::new("room_types", "By Room Type", 2, SectionKind::Table)
                .with_config("data_key", json!("room_types"))
                .with_config(
                    "columns",
                    json!([
                        field("room_type", "Room Type", "text"),
                        field("rooms_sold", "Nights Sold", "number"),
                        field("rate", "Occupancy", "percent"),
                        field("adr", "ADR", "currency"),
                    ]),
                ),
            Section::new("trend", "Daily Occupancy", 3, SectionKind::Chart)
                .with_config("chart_type", json!("line"))
                .with_config("data_key", json!("daily")),
            Section::new("daily", "Daily Detail", 4, SectionKind::Table)
                .with_config("data_key", json!("daily"))
                .with_config(
                    "columns",
                    json!([
                        field("date", "Date", "text"),
                        field("rooms_sold", "Rooms Sold", "number"),
                        field("rate", "Occupancy", "percent"),
                    ]),
                ),
            Section::new("insights", "Analysis", 5, SectionKind::Insight)
                .with_config("data_key", json!("insights")),
        ],
        parameters: vec![
            Parameter::new("date_range", "Period", ParameterKind::DateRange).required(),
            Parameter::new("room_types", "Room types", ParameterKind::MultiSelect)
                .with_options(&["standard", "deluxe", "suite", "bungalow"])
                .with_default(json!(["standard", "deluxe", "suite", "bungalow"])),
        ],
        styling: styling("8B4513", "DAA520", "CD853F", &["mudcloth"]),
        schedule: None,
    }
}
