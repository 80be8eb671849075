//! AI search and generation against the mock backend.

mod common;

use axum::http::Method;
use common::MockBackend;
use pretty_assertions::assert_eq;
use reports::{Material, OpenReportRequest, PrefetchedSearch, SearchResultItem};
use serde_json::json;

fn search_response() -> serde_json::Value {
    json!({
        "query": "Rust HTTP clients 2025",
        "results": [
            {"title": "reqwest", "snippet": "An ergonomic HTTP client", "url": "https://docs.rs/reqwest"},
            {"title": "hyper", "snippet": "A fast HTTP implementation", "url": "https://hyper.rs"}
        ]
    })
}

#[tokio::test]
async fn test_search_for_report_returns_results() {
    let backend = MockBackend::json(200, search_response()).await;
    let payload = OpenReportRequest {
        title: Some("HTTP clients".into()),
        materials: vec![Material::from_text("notes")],
        ..OpenReportRequest::default()
    };

    let search = backend.client().search_for_report(&payload).await.unwrap();

    assert_eq!(search.query, "Rust HTTP clients 2025");
    assert_eq!(search.results.len(), 2);
    assert_eq!(search.results[1].url, "https://hyper.rs");

    let req = backend.single_request().await;
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/ai/search-for-report");
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        req.json(),
        json!({
            "task_type": "open_report",
            "title": "HTTP clients",
            "materials": [{"text": "notes"}]
        })
    );
}

#[tokio::test]
async fn test_search_for_report_forwards_arbitrary_payload() {
    let backend = MockBackend::json(200, search_response()).await;
    let payload = json!({"title": "X", "user_config": {"web_search_enabled": true}, "extra": 1});

    backend.client().search_for_report(&payload).await.unwrap();

    assert_eq!(backend.single_request().await.json(), payload);
}

#[tokio::test]
async fn test_generate_open_report_embeds_prefetched_search() {
    let backend = MockBackend::json(200, json!({"content": "# Report\n\nDone."})).await;
    let search = PrefetchedSearch {
        query: "q".into(),
        results: vec![SearchResultItem {
            title: "t".into(),
            snippet: "s".into(),
            url: "https://u".into(),
        }],
    };
    let payload = OpenReportRequest {
        draft: Some("draft".into()),
        ..OpenReportRequest::default()
    }
    .with_search_results(search);

    let generated = backend.client().generate_open_report(&payload).await.unwrap();
    assert_eq!(generated.content, "# Report\n\nDone.");

    let req = backend.single_request().await;
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/ai/open-report");
    assert_eq!(
        req.json()["search_results"],
        json!({"query": "q", "results": [{"title": "t", "snippet": "s", "url": "https://u"}]})
    );
}

#[tokio::test]
async fn test_generate_open_report_surfaces_backend_detail() {
    let backend = MockBackend::json(
        503,
        json!({"detail": "Cannot reach the AI service"}),
    )
    .await;

    let err = backend
        .client()
        .generate_open_report(&OpenReportRequest::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "AI report generation failed (503): Cannot reach the AI service"
    );
}
