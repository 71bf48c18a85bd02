// domainer-lib/tests/integration.rs

//! Integration tests for domainer-lib exports and core pipeline behavior.
//!
//! Network-facing components are exercised against a local httpmock server;
//! nothing here touches the live feed or the live API.

use chrono::NaiveDate;
use domainer_lib::{
    filter_by_date, load_sorted, normalize_and_sort, parse_filter_date, save_sorted,
    DomainPipeline, DomainRecord, DomainerError, FeedSource, PipelineConfig,
};
use httpmock::prelude::*;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================
// Pipeline properties
// ============================================================

#[test]
fn test_sort_scenario_from_contract() {
    // ["b.com","a.com","a.com"] must become ["a.com","b.com"]
    let records = vec![
        DomainRecord::new("b.com"),
        DomainRecord::new("a.com"),
        DomainRecord::new("a.com"),
    ];

    let sorted = normalize_and_sort(records);
    let names: Vec<&str> = sorted.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(names, vec!["a.com", "b.com"]);
}

#[test]
fn test_filter_scenario_from_contract() {
    let records = vec![
        DomainRecord::with_date("a.com", date(2024, 12, 1)),
        DomainRecord::with_date("b.com", date(2025, 2, 1)),
    ];

    let filtered = filter_by_date(&records, parse_filter_date("2025-01-01").unwrap());
    assert_eq!(filtered, vec![DomainRecord::with_date("a.com", date(2024, 12, 1))]);
}

#[test]
fn test_sorter_idempotence_over_filtered_output() {
    let records = vec![
        DomainRecord::with_date("c.se", date(2024, 5, 1)),
        DomainRecord::with_date("A.se", date(2024, 1, 1)),
        DomainRecord::with_date("b.se", date(2024, 3, 1)),
        DomainRecord::with_date("a.se", date(2024, 2, 1)),
    ];

    let once = normalize_and_sort(records);
    let filtered = filter_by_date(&once, date(2024, 4, 1));
    let again = normalize_and_sort(filtered.clone());
    assert_eq!(filtered, again);
}

#[test]
fn test_save_load_round_trip_through_full_pipeline_shape() {
    let sorted = normalize_and_sort(vec![
        DomainRecord::with_date("beta.se", date(2025, 2, 1)),
        DomainRecord::with_date("alpha.se", date(2024, 12, 1)),
        DomainRecord::with_date("ALPHA.se", date(2024, 12, 1)),
    ]);

    let file = tempfile::NamedTempFile::new().unwrap();
    save_sorted(file.path(), &sorted).unwrap();
    let loaded = load_sorted(file.path()).unwrap();

    assert_eq!(loaded, sorted);
}

// ============================================================
// HTTP feed source against a mock server
// ============================================================

#[tokio::test]
async fn test_http_fetch_parses_feed() {
    let server = MockServer::start_async().await;
    let feed = server
        .mock_async(|when, then| {
            when.method(GET).path("/bardate_domains.txt");
            then.status(200)
                .body("beta.se\t2025-02-01\nalpha.se\t2024-12-01\n");
        })
        .await;

    let config = PipelineConfig::default()
        .with_source(FeedSource::Url(server.url("/bardate_domains.txt")))
        .with_fetch_timeout(Duration::from_secs(5));
    let pipeline = DomainPipeline::with_config(config).unwrap();

    let records = pipeline.sorted_records().await.unwrap();
    feed.assert_async().await;

    let names: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(names, vec!["alpha.se", "beta.se"]);
    assert_eq!(records[0].available_on, Some(date(2024, 12, 1)));
}

#[tokio::test]
async fn test_http_fetch_non_success_status_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(503);
        })
        .await;

    let config = PipelineConfig::default()
        .with_source(FeedSource::Url(server.url("/feed")))
        .with_fetch_timeout(Duration::from_secs(5));
    let pipeline = DomainPipeline::with_config(config).unwrap();

    let err = pipeline.fetch_records().await.unwrap_err();
    assert!(matches!(err, DomainerError::FetchError { .. }));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_http_fetch_empty_feed_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(200).body("# nothing but comments\n");
        })
        .await;

    let config = PipelineConfig::default()
        .with_source(FeedSource::Url(server.url("/feed")))
        .with_fetch_timeout(Duration::from_secs(5));
    let pipeline = DomainPipeline::with_config(config).unwrap();

    let err = pipeline.fetch_records().await.unwrap_err();
    assert!(matches!(err, DomainerError::FetchError { .. }));
}

// ============================================================
// Analysis dispatch against a mock chat-completions endpoint
// ============================================================

#[tokio::test]
async fn test_analysis_relays_response_verbatim() {
    let server = MockServer::start_async().await;
    let completion = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("alpha.se");
            then.status(200).json_body(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant",
                                   "content": "1. alpha.se — short and brandable.\n" } }
                ]
            }));
        })
        .await;

    let config = PipelineConfig::default().with_api_base(server.url("/v1"));
    let pipeline = DomainPipeline::with_config(config).unwrap();
    let client = pipeline.analyzer("test-key").unwrap();

    let records = vec![DomainRecord::with_date("alpha.se", date(2024, 12, 1))];
    let analysis = client.analyze(&records).await.unwrap();

    completion.assert_async().await;
    assert_eq!(analysis, "1. alpha.se — short and brandable.");
}

#[tokio::test]
async fn test_analysis_server_error_carries_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let config = PipelineConfig::default().with_api_base(server.url("/v1"));
    let pipeline = DomainPipeline::with_config(config).unwrap();
    let client = pipeline.analyzer("test-key").unwrap();

    let err = client
        .analyze(&[DomainRecord::new("alpha.se")])
        .await
        .unwrap_err();
    match err {
        DomainerError::AnalysisError { status_code, .. } => {
            assert_eq!(status_code, Some(429));
        }
        other => panic!("expected AnalysisError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_analysis_missing_choices_is_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({ "choices": [] }));
        })
        .await;

    let config = PipelineConfig::default().with_api_base(server.url("/v1"));
    let pipeline = DomainPipeline::with_config(config).unwrap();
    let client = pipeline.analyzer("test-key").unwrap();

    let err = client
        .analyze(&[DomainRecord::new("alpha.se")])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainerError::AnalysisError { .. }));
}

#[tokio::test]
async fn test_empty_filtered_collection_never_reaches_the_api() {
    let server = MockServer::start_async().await;
    let completion = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({ "choices": [] }));
        })
        .await;

    let config = PipelineConfig::default().with_api_base(server.url("/v1"));
    let pipeline = DomainPipeline::with_config(config).unwrap();
    let client = pipeline.analyzer("test-key").unwrap();

    let records = vec![DomainRecord::with_date("late.se", date(2025, 6, 1))];
    let filtered = filter_by_date(&records, date(2024, 1, 1));
    assert!(filtered.is_empty());

    let err = client.analyze(&filtered).await.unwrap_err();
    assert!(matches!(err, DomainerError::EmptyInput { .. }));
    completion.assert_hits_async(0).await;
}
