use std::collections::HashSet;

use serde_json::json;
use uuid::Uuid;

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::{GeneratedReport, ReportMetadata};
use africasuite_core::models::template::{OutputFormat, ReportTemplate, Section, SectionKind};
use africasuite_export::error::ExportError;
use africasuite_export::format::{format_value, group_thousands, ValueFormat};
use africasuite_export::layout::{build_layout, Block};
use africasuite_export::render;
use africasuite_export::styles::{normalize_hex, DocumentStyles};
use africasuite_export::xlsx::unique_sheet_name;
use africasuite_templates::TemplateRegistry;

fn financial_template() -> ReportTemplate {
    TemplateRegistry::builtin()
        .get_template("financial_daily")
        .unwrap()
        .clone()
}

fn financial_report() -> GeneratedReport {
    GeneratedReport {
        id: Uuid::new_v4(),
        template_id: "financial_daily".to_string(),
        title: "Rapport Financier Journalier".to_string(),
        format: OutputFormat::Document,
        parameters: ParameterValues::new(),
        data: json!({
            "revenue": { "rooms": 2500000, "restaurant": 800000, "services": 200000, "total": 3500000 },
            "expenses": { "total": 1200000 },
            "net_income": 2300000,
            "breakdown": [
                { "category": "Rooms", "amount": 2500000, "share": 71.4 },
                { "category": "Restaurant", "amount": 800000, "share": 22.9 },
                { "category": "Services", "amount": 200000, "share": 5.7 }
            ],
            "payments": [
                { "method": "Cash", "transactions": 12, "amount": 900000 },
                { "method": "Orange Money", "transactions": 30, "amount": 2600000 }
            ],
            "insights": ["Rooms carried **71%** of revenue."]
        }),
        metadata: ReportMetadata {
            generated_at: "2024-01-15T18:30:00Z".parse().unwrap(),
            generated_by: "night.manager".to_string(),
            date_range: "2024-01-15".to_string(),
            currency: "XOF".to_string(),
            organization: "Hôtel Teranga".to_string(),
        },
    }
}

#[test]
fn layout_follows_declared_section_order() {
    let template = financial_template();
    let layout = build_layout(&template, &financial_report()).unwrap();

    let expected: Vec<&str> = template
        .sections_in_order()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(layout.section_ids(), expected);
    assert_eq!(
        layout.section_ids(),
        vec!["kpis", "breakdown", "trend", "payments", "insights"]
    );
}

#[test]
fn kpi_values_are_formatted_with_currency() {
    let layout = build_layout(&financial_template(), &financial_report()).unwrap();
    let Block::KpiGrid { columns, items, .. } = &layout.blocks[0] else {
        panic!("first block should be the KPI grid");
    };
    assert_eq!(*columns, 3);
    assert_eq!(items[0].label, "Total Revenue");
    assert_eq!(items[0].value.text, "3 500 000 XOF");
    assert_eq!(items[0].value.number, Some(3_500_000.0));
}

#[test]
fn tables_and_charts_read_their_data_slice() {
    let layout = build_layout(&financial_template(), &financial_report()).unwrap();
    match &layout.blocks[1] {
        Block::Table { headers, rows, .. } => {
            assert_eq!(headers, &vec!["Category", "Amount", "Share"]);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0][0].text, "Rooms");
            assert_eq!(rows[0][2].text, "71.4%");
        }
        other => panic!("unexpected block {other:?}"),
    }
    match &layout.blocks[2] {
        Block::ChartPlaceholder { chart_type, points, .. } => {
            assert_eq!(chart_type, "pie");
            assert_eq!(*points, 3);
        }
        other => panic!("unexpected block {other:?}"),
    }
}

#[test]
fn missing_table_data_renders_empty_table() {
    let mut report = financial_report();
    report.data.as_object_mut().unwrap().remove("payments");
    let layout = build_layout(&financial_template(), &report).unwrap();
    match &layout.blocks[3] {
        Block::Table { rows, .. } => assert!(rows.is_empty()),
        other => panic!("unexpected block {other:?}"),
    }
}

#[test]
fn layout_is_deterministic() {
    let template = financial_template();
    let report = financial_report();
    let first = build_layout(&template, &report).unwrap();
    let second = build_layout(&template, &report).unwrap();
    assert_eq!(first, second);
}

#[test]
fn renders_both_formats_as_zip_packages() {
    let template = financial_template();
    let report = financial_report();
    let styles = DocumentStyles::default();

    let doc = render(&template, &report, OutputFormat::Document, &styles).unwrap();
    assert!(doc.bytes.starts_with(b"PK"));
    assert_eq!(doc.file_name, "rapport_financier_journalier_2024-01-15.docx");

    let sheet = render(&template, &report, OutputFormat::Spreadsheet, &styles).unwrap();
    assert!(sheet.bytes.starts_with(b"PK"));
    assert_eq!(sheet.file_name, "rapport_financier_journalier_2024-01-15.xlsx");
    assert_eq!(
        sheet.content_type(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn malformed_section_config_is_reported() {
    let mut template = financial_template();
    template.sections.push(
        Section::new("broken", "Broken", 9, SectionKind::Table).with_config("columns", json!([])),
    );
    let err = build_layout(&template, &financial_report()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidSectionConfig { ref section, .. } if section == "broken"));
}

#[test]
fn insight_without_source_is_reported() {
    let mut template = financial_template();
    template
        .sections
        .push(Section::new("empty", "Empty", 9, SectionKind::Insight));
    assert!(build_layout(&template, &financial_report()).is_err());
}

#[test]
fn value_formatting() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1 000");
    assert_eq!(group_thousands(-1234567), "-1 234 567");

    let v = json!(12.34);
    assert_eq!(format_value(Some(&v), ValueFormat::Percent, "XOF").text, "12.3%");
    assert_eq!(format_value(None, ValueFormat::Currency, "XOF").text, "-");
    assert_eq!(format_value(Some(&json!(true)), ValueFormat::Text, "XOF").text, "Yes");
}

#[test]
fn sheet_names_are_sanitized_and_unique() {
    let mut used = HashSet::new();
    used.insert("summary".to_string());
    assert_eq!(unique_sheet_name("Revenue / Breakdown", &mut used), "Revenue   Breakdown");
    assert_eq!(unique_sheet_name("Summary", &mut used), "Summary (2)");
    let long = unique_sheet_name(&"x".repeat(40), &mut used);
    assert_eq!(long.chars().count(), 31);
    let long_again = unique_sheet_name(&"x".repeat(40), &mut used);
    assert!(long_again.ends_with(" (2)"));
    assert_eq!(long_again.chars().count(), 31);
}

#[test]
fn hex_colors_are_normalized() {
    assert_eq!(normalize_hex("#c65d07"), Some("C65D07".to_string()));
    assert_eq!(normalize_hex("red"), None);
}

#[test]
fn history_sheet_name_is_avoided() {
    let mut used = HashSet::new();
    assert_eq!(unique_sheet_name("History", &mut used), "History (2)");
    assert_eq!(unique_sheet_name("HISTORY", &mut used), "HISTORY (3)");
}

#[test]
fn table_titled_history_still_renders_workbook() {
    let mut template = financial_template();
    for section in &mut template.sections {
        if section.id == "payments" {
            section.title = "History".to_string();
        }
    }
    let artifact = render(
        &template,
        &financial_report(),
        OutputFormat::Spreadsheet,
        &DocumentStyles::default(),
    )
    .unwrap();
    assert!(artifact.bytes.starts_with(b"PK"));
}
