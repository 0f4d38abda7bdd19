use std::collections::HashSet;

use africasuite_core::models::template::{SectionKind, TemplateCategory};
use africasuite_templates::error::TemplateError;
use africasuite_templates::{builtin, loader, TemplateRegistry};

const CUSTOM_TEMPLATE: &str = r#"{
    "id": "housekeeping_daily",
    "name": "Housekeeping",
    "category": "occupancy",
    "default_format": "spreadsheet",
    "sections": [
        { "id": "status", "title": "Room Status", "order": 2, "kind": "table",
          "config": { "data_key": "rooms", "columns": [] } },
        { "id": "kpis", "title": "Summary", "order": 1, "kind": "kpi" }
    ],
    "parameters": [
        { "name": "date", "label": "Date", "kind": "date", "required": true }
    ]
}"#;

#[test]
fn every_id_listed_exactly_once_and_lookup_is_identity() {
    let registry = TemplateRegistry::builtin();
    let mut seen = HashSet::new();
    for template in registry.list_templates() {
        assert!(seen.insert(template.id.clone()), "duplicate id {}", template.id);
        let fetched = registry.get_template(&template.id).unwrap();
        assert_eq!(fetched, template);
    }
    assert_eq!(seen.len(), registry.len());
}

#[test]
fn listing_is_stable() {
    let registry = TemplateRegistry::builtin();
    let first: Vec<_> = registry.list_templates().iter().map(|t| t.id.clone()).collect();
    let second: Vec<_> = registry.list_templates().iter().map(|t| t.id.clone()).collect();
    assert_eq!(first, second);
    assert_eq!(first[0], "financial_daily");
}

#[test]
fn unknown_id_is_not_found() {
    let registry = TemplateRegistry::builtin();
    let err = registry.get_template("does_not_exist").unwrap_err();
    assert!(matches!(err, TemplateError::NotFound(ref id) if id == "does_not_exist"));
}

#[test]
fn filters_by_category() {
    let registry = TemplateRegistry::builtin();
    let financial: Vec<_> = registry
        .templates_by_category(TemplateCategory::Financial)
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(financial, vec!["financial_daily"]);
}

#[test]
fn financial_daily_requires_date() {
    let registry = TemplateRegistry::builtin();
    let template = registry.get_template("financial_daily").unwrap();
    let date = template.parameter("date").unwrap();
    assert!(date.required);
    let breakdown = template.parameter("include_breakdown").unwrap();
    assert!(!breakdown.required);
    assert_eq!(breakdown.default, Some(serde_json::json!(true)));
}

#[test]
fn builtin_section_orders_are_unique_per_template() {
    for template in builtin::all_templates() {
        let orders: HashSet<i32> = template.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders.len(), template.sections.len(), "{}", template.id);
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut registry = TemplateRegistry::builtin();
    let copy = registry.get_template("night_audit").unwrap().clone();
    let err = registry.register(copy).unwrap_err();
    assert!(matches!(err, TemplateError::DuplicateTemplate(ref id) if id == "night_audit"));
}

#[test]
fn parses_json_template_with_kind_aliases() {
    let template = loader::parse_template(CUSTOM_TEMPLATE).unwrap();
    assert_eq!(template.id, "housekeeping_daily");
    assert_eq!(template.sections[1].kind, SectionKind::Summary);
    assert_eq!(template.sections_in_order()[0].id, "kpis");
}

#[test]
fn unknown_section_kind_fails_to_load() {
    let json = CUSTOM_TEMPLATE.replace("\"kind\": \"table\"", "\"kind\": \"heatmap\"");
    let err = loader::parse_template(&json).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Core(africasuite_core::error::CoreError::UnsupportedSectionKind(ref k))
            if k == "heatmap"
    ));
}

#[test]
fn loads_templates_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("housekeeping.json"), CUSTOM_TEMPLATE).unwrap();
    std::fs::write(dir.path().join("README.txt"), "not a template").unwrap();

    let mut registry = TemplateRegistry::builtin();
    let before = registry.len();
    let added = registry.load_json_dir(dir.path()).unwrap();

    assert_eq!(added, 1);
    assert_eq!(registry.len(), before + 1);
    assert!(registry.get_template("housekeeping_daily").is_ok());
}
