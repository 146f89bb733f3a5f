use std::sync::Arc;
use std::time::Duration;

use jobdeck_core::JobId;
use jobdeck_engine::{ApiSettings, FailureKind, JobApi, PagedJobFeed, ReqwestJobApi};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestJobApi {
    jobdeck_logging::initialize_for_tests();
    ReqwestJobApi::new(ApiSettings::with_base_url(format!("{}/jobs", server.uri())))
        .expect("client")
}

#[tokio::test]
async fn fetches_requested_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "title": "Driver", "salary": "20k"},
            {"id": "b-12", "title": "Cashier"}
        ])))
        .mount(&server)
        .await;

    let records = api_for(&server).fetch_page(2).await.expect("fetch ok").records;

    assert_eq!(
        records.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
        vec![JobId::Int(11), JobId::Text("b-12".into())]
    );
    assert_eq!(records[0].salary().as_deref(), Some("20k"));
}

#[tokio::test]
async fn accepts_wrapped_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"page": 1, "jobs": [{"id": 1}]})),
        )
        .mount(&server)
        .await;

    let page = api_for(&server).fetch_page(1).await.expect("fetch ok");
    assert_eq!(page.records.len(), 1);
}

#[tokio::test]
async fn full_page_with_unusable_entry_keeps_feed_open() {
    let server = MockServer::start().await;
    let mut items: Vec<_> = (1..=9).map(|id| json!({"id": id, "title": "Job"})).collect();
    items.push(json!({"title": "Sponsored", "kind": "ad"}));
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": items})))
        .mount(&server)
        .await;

    let feed = PagedJobFeed::new(Arc::new(api_for(&server)));
    let view = feed.load_more().await;

    assert_eq!(view.jobs.len(), 9);
    assert!(view.has_more);
    assert_eq!(view.cursor, 2);
}

#[tokio::test]
async fn fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("[]"),
        )
        .mount(&server)
        .await;

    jobdeck_logging::initialize_for_tests();
    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(format!("{}/jobs", server.uri()))
    };
    let api = ReqwestJobApi::new(settings).expect("client");

    let err = api.fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn rejects_too_large_response() {
    let server = MockServer::start().await;
    let body = format!("[{}]", vec!["{\"id\":1}"; 8].join(","));
    let body_len = body.len() as u64;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    jobdeck_logging::initialize_for_tests();
    let settings = ApiSettings {
        max_bytes: 10,
        ..ApiSettings::with_base_url(format!("{}/jobs", server.uri()))
    };
    let api = ReqwestJobApi::new(settings).expect("client");

    let err = api.fetch_page(1).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(body_len)
        }
    );
}
