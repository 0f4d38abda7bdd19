use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::schedule::{ReportSchedule, ScheduleFrequency};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

/// Daily financial summary: revenue by department, payment mix, net result.
pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "financial_daily".to_string(),
        name: "Rapport Financier Journalier".to_string(),
        description: "Daily revenue, expenses and payment mix across rooms, restaurant and services."
            .to_string(),
        category: TemplateCategory::Financial,
        default_format: OutputFormat::Document,
        sections: vec![
            Section::new("kpis", "Key Figures", 1, SectionKind::Summary)
                .with_config("columns", json!(3))
                .with_config(
                    "metrics",
                    json!([
                        field("revenue.total", "Total Revenue", "currency"),
                        field("revenue.rooms", "Rooms", "currency"),
                        field("revenue.restaurant", "Restaurant", "currency"),
                        field("revenue.services", "Services", "currency"),
                        field("expenses.total", "Expenses", "currency"),
                        field("net_income", "Net Income", "currency"),
                    ]),
                ),
            Section::new("breakdown", "Revenue Breakdown", 2, SectionKind::Table)
                .with_config("data_key", json!("breakdown"))
                .with_config(
                    "columns",
                    json!([
                        field("category", "Category", "text"),
                        field("amount", "Amount", "currency"),
                        field("share", "Share", "percent"),
                    ]),
                ),
            Section::new("trend", "Revenue Distribution", 3, SectionKind::Chart)
                .with_config("chart_type", json!("pie"))
                .with_config("data_key", json!("breakdown"))
                .with_config("caption", json!("Share of revenue per department")),
            Section::new("payments", "Payment Methods", 4, SectionKind::Table)
                .with_config("data_key", json!("payments"))
                .with_config(
                    "columns",
                    json!([
                        field("method", "Method", "text"),
                        field("transactions", "Transactions", "number"),
                        field("amount", "Amount", "currency"),
                    ]),
                ),
            Section::new("insights", "Observations", 5, SectionKind::Insight)
                .with_config("data_key", json!("insights")),
        ],
        parameters: vec![
            Parameter::new("date", "Report date", ParameterKind::Date).required(),
            Parameter::new("include_breakdown", "Include department breakdown", ParameterKind::Boolean)
                .with_default(json!(true)),
        ],
        styling: styling("C65D07", "2D5016", "F4A300", &["kente", "adinkra"]),
        schedule: Some(ReportSchedule {
            frequency: ScheduleFrequency::Daily,
            time: "06:00".to_string(),
            enabled: true,
        }),
    }
}
