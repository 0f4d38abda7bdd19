use std::sync::Arc;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use serde_json::json;
use uuid::Uuid;

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::{Artifact, GeneratedReport, ReportMetadata};
use africasuite_core::models::template::OutputFormat;
use africasuite_reports::cache::{cache_key, ReportCache};
use africasuite_reports::clock::ManualClock;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn start() -> Timestamp {
    "2024-01-15T08:00:00Z".parse().unwrap()
}

fn params(pairs: &[(&str, serde_json::Value)]) -> ParameterValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn report(template_id: &str) -> GeneratedReport {
    GeneratedReport {
        id: Uuid::new_v4(),
        template_id: template_id.to_string(),
        title: "Rapport".to_string(),
        format: OutputFormat::Document,
        parameters: ParameterValues::new(),
        data: json!({}),
        metadata: ReportMetadata {
            generated_at: start(),
            generated_by: "tester".to_string(),
            date_range: "n/a".to_string(),
            currency: "XOF".to_string(),
            organization: "Hôtel Teranga".to_string(),
        },
    }
}

fn artifact() -> Arc<Artifact> {
    Arc::new(Artifact {
        format: OutputFormat::Document,
        file_name: "rapport_2024-01-15.docx".to_string(),
        bytes: b"PK\x03\x04".to_vec(),
    })
}

#[test]
fn key_ignores_parameter_insertion_order() {
    let a = params(&[
        ("date", json!("2024-01-15")),
        ("include_breakdown", json!(true)),
        ("filters", json!({ "b": 1, "a": [1, 2] })),
    ]);
    let b = params(&[
        ("filters", json!({ "a": [1, 2], "b": 1 })),
        ("include_breakdown", json!(true)),
        ("date", json!("2024-01-15")),
    ]);

    let ka = cache_key("financial_daily", OutputFormat::Document, &a);
    let kb = cache_key("financial_daily", OutputFormat::Document, &b);
    assert_eq!(ka, kb);
    assert_eq!(ka.as_str().len(), 64);
}

#[test]
fn key_separates_template_format_and_values() {
    let p = params(&[("date", json!("2024-01-15"))]);
    let base = cache_key("financial_daily", OutputFormat::Document, &p);

    assert_ne!(base, cache_key("financial_daily", OutputFormat::Spreadsheet, &p));
    assert_ne!(base, cache_key("night_audit", OutputFormat::Document, &p));
    assert_ne!(
        base,
        cache_key(
            "financial_daily",
            OutputFormat::Document,
            &params(&[("date", json!("2024-01-16"))])
        )
    );
    // Array order is significant.
    assert_ne!(
        cache_key("x", OutputFormat::Document, &params(&[("v", json!([1, 2]))])),
        cache_key("x", OutputFormat::Document, &params(&[("v", json!([2, 1]))])),
    );
}

#[tokio::test]
async fn entry_is_served_until_ttl_then_removed() {
    let clock = Arc::new(ManualClock::new(start()));
    let cache = ReportCache::new(clock.clone(), DAY, None);
    let key = cache_key("financial_daily", OutputFormat::Document, &ParameterValues::new());

    cache.put(key.clone(), report("financial_daily"), artifact()).await;

    clock.advance(SignedDuration::from_hours(24) - SignedDuration::from_secs(1));
    assert!(cache.get(&key).await.is_some());

    clock.advance(SignedDuration::from_secs(2));
    assert!(cache.get(&key).await.is_none());
    assert!(cache.is_empty().await);

    let stats = cache.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn entry_expires_exactly_at_ttl() {
    let clock = Arc::new(ManualClock::new(start()));
    let cache = ReportCache::new(clock.clone(), Duration::from_secs(60), None);
    let key = cache_key("pos_sales", OutputFormat::Spreadsheet, &ParameterValues::new());

    let entry = cache.put(key.clone(), report("pos_sales"), artifact()).await;
    assert_eq!(entry.expires_at, start() + SignedDuration::from_secs(60));

    clock.advance(SignedDuration::from_secs(60));
    assert!(cache.get(&key).await.is_none());
}

#[tokio::test]
async fn sweep_removes_only_expired_entries() {
    let clock = Arc::new(ManualClock::new(start()));
    let cache = ReportCache::new(clock.clone(), DAY, None);
    let short = cache_key("a", OutputFormat::Document, &ParameterValues::new());
    let long = cache_key("b", OutputFormat::Document, &ParameterValues::new());

    cache
        .put_with_ttl(short.clone(), report("a"), artifact(), Duration::from_secs(10))
        .await;
    cache.put(long.clone(), report("b"), artifact()).await;

    clock.advance(SignedDuration::from_secs(11));
    assert_eq!(cache.sweep().await, 1);
    assert_eq!(cache.len().await, 1);
    assert!(cache.get(&long).await.is_some());
    assert!(cache.get(&short).await.is_none());
}

#[tokio::test]
async fn full_cache_evicts_entry_closest_to_expiry() {
    let clock = Arc::new(ManualClock::new(start()));
    let cache = ReportCache::new(clock.clone(), DAY, Some(2));
    let soon = cache_key("soon", OutputFormat::Document, &ParameterValues::new());
    let later = cache_key("later", OutputFormat::Document, &ParameterValues::new());
    let newest = cache_key("newest", OutputFormat::Document, &ParameterValues::new());

    cache
        .put_with_ttl(soon.clone(), report("soon"), artifact(), Duration::from_secs(60))
        .await;
    cache.put(later.clone(), report("later"), artifact()).await;
    cache.put(newest.clone(), report("newest"), artifact()).await;

    assert_eq!(cache.len().await, 2);
    assert!(cache.get(&soon).await.is_none());
    assert!(cache.get(&later).await.is_some());
    assert!(cache.get(&newest).await.is_some());
}

#[tokio::test]
async fn replacing_a_key_does_not_evict() {
    let clock = Arc::new(ManualClock::new(start()));
    let cache = ReportCache::new(clock.clone(), DAY, Some(1));
    let key = cache_key("only", OutputFormat::Document, &ParameterValues::new());

    cache.put(key.clone(), report("only"), artifact()).await;
    let second = report("only");
    let second_id = second.id;
    cache.put(key.clone(), second, artifact()).await;

    let entry = cache.get(&key).await.unwrap();
    assert_eq!(entry.report.id, second_id);
    assert_eq!(cache.len().await, 1);
}
