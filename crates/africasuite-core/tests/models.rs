use std::str::FromStr;

use serde_json::json;

use africasuite_core::error::CoreError;
use africasuite_core::models::job::{JobPriority, JobStatus};
use africasuite_core::models::parameter::{Parameter, ParameterKind, ParameterValues};
use africasuite_core::models::template::{
    OutputFormat, ReportTemplate, Section, SectionKind, TemplateCategory, TemplateStyling,
};
use africasuite_core::paths;

fn template() -> ReportTemplate {
    ReportTemplate {
        id: "sample".to_string(),
        name: "Sample".to_string(),
        description: String::new(),
        category: TemplateCategory::Financial,
        default_format: OutputFormat::Document,
        sections: vec![
            Section::new("c", "Third", 3, SectionKind::Insight),
            Section::new("a", "First", 1, SectionKind::Summary),
            Section::new("b1", "Second (declared first)", 2, SectionKind::Table),
            Section::new("b2", "Second (declared second)", 2, SectionKind::Chart),
        ],
        parameters: vec![
            Parameter::new("date", "Date", ParameterKind::Date).required(),
            Parameter::new("include_breakdown", "Include breakdown", ParameterKind::Boolean)
                .with_default(json!(true)),
            Parameter::new("outlet", "Outlet", ParameterKind::SingleSelect)
                .required()
                .with_default(json!("restaurant")),
        ],
        styling: TemplateStyling::default(),
        schedule: None,
    }
}

#[test]
fn sections_sort_by_order_and_keep_ties_stable() {
    let template = template();
    let ids: Vec<&str> = template
        .sections_in_order()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b1", "b2", "c"]);
}

#[test]
fn missing_required_parameter_is_named() {
    let template = template();
    let mut values = ParameterValues::new();
    values.insert("outlet".to_string(), json!("bar"));

    let err = template.require_parameters(&values).unwrap_err();
    assert!(matches!(err, CoreError::MissingParameter(ref name) if name == "date"));
}

#[test]
fn null_counts_as_missing() {
    let template = template();
    let mut values = ParameterValues::new();
    values.insert("date".to_string(), serde_json::Value::Null);
    values.insert("outlet".to_string(), json!("bar"));

    assert!(template.require_parameters(&values).is_err());
}

#[test]
fn defaults_fill_optional_parameters_only() {
    let template = template();
    let resolved = template.resolve_parameters(ParameterValues::new());

    assert_eq!(resolved.get("include_breakdown"), Some(&json!(true)));
    assert!(!resolved.contains_key("outlet"));
    assert!(!resolved.contains_key("date"));
}

#[test]
fn caller_values_win_over_defaults() {
    let template = template();
    let mut values = ParameterValues::new();
    values.insert("include_breakdown".to_string(), json!(false));

    let resolved = template.resolve_parameters(values);
    assert_eq!(resolved.get("include_breakdown"), Some(&json!(false)));
}

#[test]
fn unknown_section_kind_is_rejected() {
    let err = SectionKind::from_str("heatmap").unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedSectionKind(ref k) if k == "heatmap"));
    assert_eq!(SectionKind::from_str("kpi").unwrap(), SectionKind::Summary);
}

#[test]
fn priorities_order_low_normal_high() {
    assert!(JobPriority::High > JobPriority::Normal);
    assert!(JobPriority::Normal > JobPriority::Low);
    assert_eq!(JobPriority::default(), JobPriority::Normal);
}

#[test]
fn job_status_transitions_are_one_way() {
    assert!(JobStatus::Pending.can_transition_to(JobStatus::Processing));
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Completed));
    assert!(JobStatus::Processing.can_transition_to(JobStatus::Failed));
    assert!(!JobStatus::Pending.can_transition_to(JobStatus::Completed));
    assert!(!JobStatus::Completed.can_transition_to(JobStatus::Processing));
    assert!(!JobStatus::Failed.can_transition_to(JobStatus::Pending));
}

#[test]
fn file_names_use_slug_and_date() {
    let date = jiff::civil::date(2024, 1, 15);
    assert_eq!(
        paths::report_file_name("Rapport Financier  Journalier!", date, OutputFormat::Document),
        "rapport_financier_journalier_2024-01-15.docx"
    );
    assert_eq!(
        paths::report_file_name("***", date, OutputFormat::Spreadsheet),
        "report_2024-01-15.xlsx"
    );
}

#[test]
fn template_round_trips_through_json() {
    let template = template();
    let json = serde_json::to_string(&template).unwrap();
    let back: ReportTemplate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, template);
    assert!(json.contains("\"kind\":\"summary\""));
}

#[test]
fn format_names_and_aliases_deserialize() {
    let parse = |raw: &str| serde_json::from_value::<OutputFormat>(serde_json::json!(raw));
    assert_eq!(parse("document").unwrap(), OutputFormat::Document);
    assert_eq!(parse("pdf").unwrap(), OutputFormat::Document);
    assert_eq!(parse("XLSX").unwrap(), OutputFormat::Spreadsheet);
    assert_eq!(parse("excel").unwrap(), OutputFormat::Spreadsheet);

    let err = parse("pptx").unwrap_err();
    assert!(err.to_string().contains("unknown output format: pptx"));
    assert_eq!(
        serde_json::to_value(OutputFormat::Spreadsheet).unwrap(),
        serde_json::json!("spreadsheet")
    );
}

#[test]
fn priority_deserializes_case_insensitively() {
    let parse = |raw: &str| serde_json::from_value::<JobPriority>(serde_json::json!(raw));
    assert_eq!(parse("high").unwrap(), JobPriority::High);
    assert_eq!(parse("Low").unwrap(), JobPriority::Low);
    assert!(matches!(
        JobPriority::from_str("urgent"),
        Err(CoreError::UnknownPriority(p)) if p == "urgent"
    ));
    assert!(parse("urgent").is_err());
}
