//! Search and document submission against a mock tags API.

mod common;

use common::{FakeView, page_with};
use serde_json::json;
use tags_business::{
    ApiSink, BusinessConfig, Document, DocumentSink, Error, LogSink, PageView, fetch_documents,
};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_search(body: ResponseTemplate) -> MockServer {
    common::init_logger();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/rust%1[Ff]web$"))
        .respond_with(body)
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> BusinessConfig {
    BusinessConfig::new(server.uri())
}

#[tokio::test]
async fn test_search_round_trip_renders_cards() {
    let server = server_with_search(ResponseTemplate::new(200).set_body_json(json!([
        { "Id": 1, "Name": "Ferris", "Type": "text", "Content": "crab", "Tags": ["rust"], "Uid": 3 },
        { "Id": 2, "Name": "Docs", "Type": "url", "Content": "https://docs.rs", "Tags": null, "Uid": 3 }
    ])))
    .await;

    let mut page = page_with(config_for(&server), FakeView::standard(), "");
    page.view_mut().set_input_value("searchq", "rust web");

    let request = page.search();
    let result = request.execute().await.expect("request was not cancelled");
    assert!(page.finish_search(request.id(), result));

    let html = page.view().html_of("docs");
    assert_eq!(html.matches(r#"<div class="doc panel">"#).count(), 2);
    assert!(html.contains(r#"<span class="name">Ferris</span>"#));
    assert!(html.contains(r#"<a href="https://docs.rs">https://docs.rs</a>"#));
}

#[tokio::test]
async fn test_null_body_means_no_results() {
    let server = server_with_search(ResponseTemplate::new(200).set_body_string("null")).await;
    let url = format!("{}/api/rust%1Fweb", server.uri());

    let docs = fetch_documents(&url).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_empty_array_shows_no_results() {
    let server = server_with_search(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let mut page = page_with(config_for(&server), FakeView::standard(), "");
    page.view_mut().set_input_value("searchq", "rust web");
    let request = page.search();
    let result = request.execute().await.unwrap();
    page.finish_search(request.id(), result);

    assert_eq!(page.view().html_of("docs"), "No results.");
}

#[tokio::test]
async fn test_server_error_shows_failure() {
    let server = server_with_search(ResponseTemplate::new(500).set_body_string("db down")).await;

    let mut page = page_with(config_for(&server), FakeView::standard(), "");
    page.view_mut().set_input_value("searchq", "rust web");
    let request = page.search();
    let result = request.execute().await.unwrap();
    assert!(matches!(result, Err(Error::Status { status: 500, .. })));

    page.finish_search(request.id(), result);
    assert_eq!(page.view().html_of("docs"), "Search failed.");
}

#[tokio::test]
async fn test_superseded_request_is_cancelled() {
    let server = server_with_search(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let mut page = page_with(config_for(&server), FakeView::standard(), "");
    page.view_mut().set_input_value("searchq", "rust web");
    let older = page.search();
    let newer = page.search();

    assert!(older.execute().await.is_none());

    let result = newer.execute().await.unwrap();
    assert!(page.finish_search(newer.id(), result));
    assert_eq!(page.view().html_of("docs"), "No results.");
}

#[tokio::test]
async fn test_api_sink_posts_json() {
    common::init_logger();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Id": 7, "Name": "Notes", "Type": "text", "Content": "body", "Tags": ["a"], "Uid": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = ApiSink::new(&config_for(&server));
    let stored = sink
        .submit(Document::new("Notes", "text", "body", ["a"]))
        .await
        .unwrap()
        .expect("server returns the stored record");

    assert_eq!(stored.id, Some(7));
    assert_eq!(stored.uid, Some(1));
}

#[tokio::test]
async fn test_api_sink_reports_rejection() {
    common::init_logger();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing name"))
        .mount(&server)
        .await;

    let sink = ApiSink::new(&config_for(&server));
    let result = sink.submit(Document::new("", "text", "body", ["a"])).await;
    assert!(matches!(result, Err(Error::Status { status: 400, .. })));
}

#[tokio::test]
async fn test_log_sink_keeps_nothing() {
    let result = LogSink
        .submit(Document::new("n", "text", "c", ["t"]))
        .await
        .unwrap();
    assert!(result.is_none());
}
