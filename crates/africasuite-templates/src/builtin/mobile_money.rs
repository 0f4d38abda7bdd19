use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

/// Mobile-money collections per provider (Orange Money, MTN MoMo, Wave, Moov).
pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "mobile_money".to_string(),
        name: "Paiements Mobile Money".to_string(),
        description: "Mobile-money collections, success rates and fees by provider.".to_string(),
        category: TemplateCategory::MobileMoney,
        default_format: OutputFormat::Document,
        sections: vec![
            Section::new("kpis", "Collections", 1, SectionKind::Summary)
                .with_config("columns", json!(2))
                .with_config(
                    "metrics",
                    json!([
                        field("payments.total", "Amount Collected", "currency"),
                        field("payments.transactions", "Transactions", "number"),
                        field("payments.success_rate", "Success Rate", "percent"),
                        field("payments.fees", "Provider Fees", "currency"),
                    ]),
                ),
            Section::new("providers", "By Provider", 2, SectionKind::Table)
                .with_config("data_key", json!("providers"))
                .with_config(
                    "columns",
                    json!([
                        field("provider", "Provider", "text"),
                        field("transactions", "Transactions", "number"),
                        field("amount", "Amount", "currency"),
                        field("success_rate", "Success Rate", "percent"),
                    ]),
                ),
            Section::new("share", "Provider Share", 3, SectionKind::Chart)
                .with_config("chart_type", json!("donut"))
                .with_config("data_key", json!("providers")),
            Section::new("insights", "Notes", 4, SectionKind::Insight)
                .with_config("data_key", json!("insights")),
        ],
        parameters: vec![
            Parameter::new("date_range", "Period", ParameterKind::DateRange).required(),
            Parameter::new("providers", "Providers", ParameterKind::MultiSelect)
                .with_options(&["orange_money", "mtn_momo", "wave", "moov_money"])
                .with_default(json!(["orange_money", "mtn_momo", "wave", "moov_money"])),
            Parameter::new("min_amount", "Minimum amount", ParameterKind::Number),
        ],
        styling: styling("FF7900", "FFCC00", "1DC3E3", &["wax"]),
        schedule: None,
    }
}
