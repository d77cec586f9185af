//! End-to-end tests for the Georgia Procurement Registry adapter

use crate::common::{
    gpr_config, gpr_scraper, mount_landing, mount_search, test_http_config, three_rows,
    SESSION_COOKIE,
};
use procurement_scout::scraper::{ScrapeError, Scraper};
use procurement_scout::sources::georgia::GprScraper;
use serde_json::json;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL_PAGE_K1: &str = r#"
<html><body>
  <h1>Road Salt</h1>
  <table>
    <tr><td><a href="/files/spec.pdf">Specification</a></td></tr>
    <tr><td><a href="/gpr/download?fileId=7"></a></td></tr>
    <tr><td><a href="/gpr/index">Back to search</a></td></tr>
  </table>
</body></html>
"#;

#[tokio::test]
async fn test_full_scrape_with_session_and_details() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_landing(&mock_server).await;

    // Search only answers requests carrying the session cookie and the
    // target's expected form schema.
    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .and(header("cookie", SESSION_COOKIE))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        ))
        .and(header("origin", base_url.as_str()))
        .and(body_string_contains("eventStatus=OPEN"))
        .and(body_string_contains("length=50"))
        .and(body_string_contains("columns%5B3%5D%5Bdata%5D=agencyName"))
        .and(body_string_contains("columns%5B7%5D%5Bsearch%5D%5Bvalue%5D=&"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(three_rows().to_string()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gpr/eventDetails"))
        .and(query_param("eSourceNumber", "K1"))
        .and(query_param("sourceSystemType", "PRD"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(DETAIL_PAGE_K1),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Row 2's detail page is broken.
    Mock::given(method("GET"))
        .and(path("/gpr/eventDetails"))
        .and(query_param("eSourceNumber", "K2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = gpr_scraper(&mock_server);
    let results = scraper
        .scrape(CancellationToken::new())
        .await
        .expect("Scrape failed");

    // Detail failures never reduce the record count.
    assert_eq!(results.len(), 3);

    let first = &results[0];
    assert_eq!(first.source_id, "EV-001");
    assert_eq!(first.title, "Road Salt");
    assert_eq!(first.agency, "Department of Transportation");
    assert_eq!(
        first.url,
        format!(
            "{}/gpr/eventDetails?eSourceNumber=K1&sourceSystemType=PRD",
            base_url
        )
    );
    assert_eq!(first.documents.len(), 2);
    assert_eq!(first.documents[0].title, "Specification");
    assert_eq!(first.documents[0].url, format!("{}/files/spec.pdf", base_url));
    assert_eq!(first.documents[1].title, "Document");
    assert_eq!(
        first.documents[1].url,
        format!("{}/gpr/download?fileId=7", base_url)
    );
    assert_eq!(first.raw_data["status"], "OPEN");

    let second = &results[1];
    assert_eq!(second.source_id, "EV-002");
    assert_eq!(second.title, "Janitorial Services");
    assert!(second.has_detail_url());
    assert!(second.documents.is_empty());

    let third = &results[2];
    assert_eq!(third.source_id, "EV-003");
    assert!(!third.has_detail_url());
    assert!(third.documents.is_empty());
}

#[tokio::test]
async fn test_session_failure_is_fatal() {
    // Nothing listens on port 1.
    let scraper = GprScraper::new(gpr_config("http://127.0.0.1:1"), &test_http_config())
        .expect("Failed to build GPR scraper");

    let result = scraper.scrape(CancellationToken::new()).await;
    assert!(
        matches!(result, Err(ScrapeError::Session { .. })),
        "unexpected result: {:?}",
        result
    );
}

#[tokio::test]
async fn test_search_error_status_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Error"))
        .mount(&mock_server)
        .await;

    let result = gpr_scraper(&mock_server)
        .scrape(CancellationToken::new())
        .await;

    match result {
        Err(ScrapeError::Search { status, body_len }) => {
            assert_eq!(status, 500);
            assert_eq!(body_len, "Internal Error".len());
        }
        other => panic!("expected search error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_search_response_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Session expired</html>"))
        .mount(&mock_server)
        .await;

    let result = gpr_scraper(&mock_server)
        .scrape(CancellationToken::new())
        .await;
    assert!(matches!(result, Err(ScrapeError::Decode(_))));
}

#[tokio::test]
async fn test_empty_search_result() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(
        &mock_server,
        json!({"draw": 1, "recordsTotal": 0, "recordsFiltered": 0, "data": []}),
    )
    .await;

    let results = gpr_scraper(&mock_server)
        .scrape(CancellationToken::new())
        .await
        .expect("Scrape failed");
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_rows_with_unexpected_schema_are_zero_filled() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(
        &mock_server,
        json!({
            "recordsTotal": "2",
            "data": [
                {"esourceNumber": 4512, "title": null, "newField": [1, 2]},
                {}
            ]
        }),
    )
    .await;

    let results = gpr_scraper(&mock_server)
        .scrape(CancellationToken::new())
        .await
        .expect("Scrape failed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].source_id, "4512");
    assert!(results[0].title.is_empty());
    assert_eq!(results[0].raw_data["newField"], json!([1, 2]));
    assert!(results[1].source_id.is_empty());
    assert!(results[1].raw_data.is_empty());
}

#[tokio::test]
async fn test_cancellation_during_enrichment_keeps_all_rows() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(&mock_server, three_rows()).await;

    Mock::given(method("GET"))
        .and(path("/gpr/eventDetails"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DETAIL_PAGE_K1)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let results = gpr_scraper(&mock_server)
        .scrape(token)
        .await
        .expect("Cancellation during enrichment should not fail the scrape");

    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|s| s.documents.is_empty()));
}

#[tokio::test]
async fn test_cancellation_during_search_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(three_rows().to_string())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let result = gpr_scraper(&mock_server).scrape(token).await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(matches!(result, Err(ScrapeError::Cancelled)));
}
