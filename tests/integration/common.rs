//! Shared fixtures for integration tests

use procurement_scout::config::{GprConfig, HttpConfig};
use procurement_scout::sources::georgia::GprScraper;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_COOKIE: &str = "JSESSIONID=abc123";
const SET_COOKIE: &str = "JSESSIONID=abc123; Path=/";

/// Adapter configuration pointing at the mock server
pub fn gpr_config(base: &str) -> GprConfig {
    GprConfig {
        enabled: true,
        base_url: format!("{}/gpr/index", base),
        search_url: format!("{}/gpr/eventSearch", base),
        details_url: format!("{}/gpr/eventDetails", base),
        page_size: 50,
        politeness_delay_ms: 1,
    }
}

pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        request_timeout_secs: 10,
        connect_timeout_secs: 2,
        ..HttpConfig::default()
    }
}

pub fn gpr_scraper(server: &MockServer) -> GprScraper {
    GprScraper::new(gpr_config(&server.uri()), &test_http_config())
        .expect("Failed to build GPR scraper")
}

/// Three rows: two with detail keys, one without
pub fn three_rows() -> Value {
    json!({
        "draw": 1,
        "recordsTotal": 3,
        "recordsFiltered": 3,
        "data": [
            {
                "esourceNumber": "EV-001",
                "esourceNumberKey": "K1",
                "sourceId": "PRD",
                "title": "Road Salt",
                "agencyName": "Department of Transportation",
                "status": "OPEN"
            },
            {
                "esourceNumber": "EV-002",
                "esourceNumberKey": "K2",
                "sourceId": "PRD",
                "title": "Janitorial Services",
                "agencyName": "Department of Revenue",
                "status": "OPEN"
            },
            {
                "esourceNumber": "EV-003",
                "title": "Office Chairs",
                "agencyName": "Board of Regents",
                "status": "OPEN"
            }
        ]
    })
}

/// Mounts a landing page that issues the session cookie
pub async fn mount_landing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/gpr/index"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", SET_COOKIE)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>GPR</body></html>"),
        )
        .mount(server)
        .await;
}

/// Mounts a search endpoint returning `body` with status 200
pub async fn mount_search(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(body.to_string()),
        )
        .mount(server)
        .await;
}
