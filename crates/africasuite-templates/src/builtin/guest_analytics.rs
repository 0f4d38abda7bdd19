use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "guest_analytics".to_string(),
        name: "Analyse de la Clientèle".to_string(),
        description: "Guest volumes, origin markets and booking channels.".to_string(),
        category: TemplateCategory::Guest,
        default_format: OutputFormat::Spreadsheet,
        sections: vec![
            Section::new("kpis", "Guest Overview", 1, SectionKind::Summary)
                .with_config("columns", json!(3))
                .with_config(
                    "metrics",
                    json!([
                        field("guests.total", "Guests", "number"),
                        field("guests.new", "New Guests", "number"),
                        field("guests.returning", "Returning Guests", "number"),
                        field("guests.average_stay", "Average Stay (nights)", "number"),
                        field("guests.satisfaction", "Satisfaction", "percent"),
                    ]),
                ),
            Section::new("nationalities", "Origin Markets", 2, SectionKind::Table)
                .with_config("data_key", json!("nationalities"))
                .with_config(
                    "columns",
                    json!([
                        field("country", "Country", "text"),
                        field("guests", "Guests", "number"),
                        field("share", "Share", "percent"),
                    ]),
                ),
            Section::new("channels", "Booking Channels", 3, SectionKind::Table)
                .with_config("data_key", json!("channels"))
                .with_config(
                    "columns",
                    json!([
                        field("channel", "Channel", "text"),
                        field("bookings", "Bookings", "number"),
                        field("revenue", "Revenue", "currency"),
                    ]),
                ),
            Section::new("insights", "Guest Insights", 4, SectionKind::Insight)
                .with_config("data_key", json!("insights")),
        ],
        parameters: vec![
            Parameter::new("date_range", "Period", ParameterKind::DateRange).required(),
            Parameter::new("segment", "Segment", ParameterKind::SingleSelect)
                .with_options(&["all", "business", "leisure", "group"])
                .with_default(json!("all")),
        ],
        styling: styling("006B3F", "FCD116", "CE1126", &["kente"]),
        schedule: None,
    }
}
