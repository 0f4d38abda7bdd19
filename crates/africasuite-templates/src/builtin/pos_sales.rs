use serde_json::json;

use africasuite_core::models::parameter::{Parameter, ParameterKind};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory,
};

use super::{field, styling};

/// Point-of-sale activity across food and beverage outlets.
pub fn template() -> ReportTemplate {
    ReportTemplate {
        id: "pos_sales".to_string(),
        name: "Ventes Restauration & Bar".to_string(),
        description: "Covers, average ticket and best sellers per outlet.".to_string(),
        category: TemplateCategory::FoodBeverage,
        default_format: OutputFormat::Spreadsheet,
        sections: vec![
            Section::new("kpis", "Sales Summary", 1, SectionKind::Summary)
                .with_config("columns", json!(3))
                .with_config(
                    "metrics",
                    json!([
                        field("sales.total", "Total Sales", "currency"),
                        field("sales.covers", "Covers", "number"),
                        field("sales.average_ticket", "Average Ticket", "currency"),
                    ]),
                ),
            Section::new("outlets", "Outlets", 2, SectionKind::Table)
                .with_config("data_key", json!("outlets"))
                .with_config(
                    "columns",
                    json!([
                        field("outlet", "Outlet", "text"),
                        field("covers", "Covers", "number"),
                        field("revenue", "Revenue", "currency"),
                    ]),
                ),
            Section::new("top_items", "Best Sellers", 3, SectionKind::Table)
                .with_config("data_key", json!("top_items"))
                .with_config(
                    "columns",
                    json!([
                        field("item", "Item", "text"),
                        field("quantity", "Quantity", "number"),
                        field("revenue", "Revenue", "currency"),
                    ]),
                ),
            Section::new("mix", "Sales Mix", 4, SectionKind::Chart)
                .with_config("chart_type", json!("bar"))
                .with_config("data_key", json!("outlets")),
        ],
        parameters: vec![
            Parameter::new("date", "Business date", ParameterKind::Date).required(),
            Parameter::new("outlets", "Outlets", ParameterKind::MultiSelect)
                .with_options(&["restaurant", "bar", "room_service", "pool_bar"])
                .with_default(json!(["restaurant", "bar", "room_service", "pool_bar"])),
        ],
        styling: styling("A0522D", "F5DEB3", "D2691E", &["bogolan"]),
        schedule: None,
    }
}
