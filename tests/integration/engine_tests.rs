//! Engine runs against a mocked registry alongside misbehaving adapters

use crate::common::{gpr_config, gpr_scraper, mount_landing, mount_search, test_http_config, three_rows};
use async_trait::async_trait;
use procurement_scout::config::Config;
use procurement_scout::engine::{AdapterStatus, Engine};
use procurement_scout::model::Solicitation;
use procurement_scout::scraper::{ScrapeError, Scraper};
use procurement_scout::sources::register_enabled;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Always fails at the search phase
struct BrokenSite;

#[async_trait]
impl Scraper for BrokenSite {
    fn name(&self) -> &str {
        "broken-site"
    }

    async fn scrape(&self, _token: CancellationToken) -> Result<Vec<Solicitation>, ScrapeError> {
        Err(ScrapeError::Search {
            status: 503,
            body_len: 0,
        })
    }
}

/// Returns a fixed batch after a short delay
struct StaticSite {
    items: usize,
}

#[async_trait]
impl Scraper for StaticSite {
    fn name(&self) -> &str {
        "static-site"
    }

    async fn scrape(&self, _token: CancellationToken) -> Result<Vec<Solicitation>, ScrapeError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok((0..self.items)
            .map(|i| Solicitation::new(format!("STATIC-{}", i)))
            .collect())
    }
}

#[tokio::test]
async fn test_engine_merges_registry_and_static_results() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(&mock_server, three_rows()).await;

    let mut engine = Engine::new();
    engine.register(gpr_scraper(&mock_server));
    engine.register(StaticSite { items: 2 });
    engine.register(BrokenSite);

    let report = engine.run(CancellationToken::new()).await;

    assert!(!report.cancelled);
    assert_eq!(report.total_items(), 5);
    assert!(!report.all_failed());

    let statuses: Vec<_> = report.adapters.iter().map(|a| &a.status).collect();
    assert_eq!(*statuses[0], AdapterStatus::Succeeded { items: 3 });
    assert_eq!(*statuses[1], AdapterStatus::Succeeded { items: 2 });
    assert!(matches!(statuses[2], AdapterStatus::Failed { .. }));

    let failed: Vec<_> = report
        .failed_adapters()
        .iter()
        .map(|a| a.name.clone())
        .collect();
    assert_eq!(failed, vec!["broken-site".to_string()]);

    let mut ids: Vec<_> = report
        .solicitations
        .iter()
        .map(|s| s.source_id.clone())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["EV-001", "EV-002", "EV-003", "STATIC-0", "STATIC-1"]);
}

#[tokio::test]
async fn test_engine_reports_registry_outage() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/gpr/eventSearch"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let mut engine = Engine::new();
    engine.register(gpr_scraper(&mock_server));
    engine.register(BrokenSite);

    let report = engine.run(CancellationToken::new()).await;

    assert!(report.solicitations.is_empty());
    assert!(report.all_failed());
    match &report.adapters[0].status {
        AdapterStatus::Failed { error } => assert!(error.contains("502"), "error: {}", error),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_deadline_keeps_rows_from_slow_detail_pages() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(&mock_server, three_rows()).await;

    Mock::given(method("GET"))
        .and(path("/gpr/eventDetails"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<a href=\"/f.pdf\">F</a>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let mut engine = Engine::new();
    engine.register(gpr_scraper(&mock_server));

    let start = Instant::now();
    let report = engine
        .run_with_timeout(&CancellationToken::new(), Duration::from_millis(400))
        .await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert!(report.cancelled);
    assert_eq!(report.total_items(), 3);
    assert_eq!(
        report.adapters[0].status,
        AdapterStatus::Succeeded { items: 3 }
    );
}

#[tokio::test]
async fn test_register_enabled_uses_config_endpoints() {
    let mock_server = MockServer::start().await;
    mount_landing(&mock_server).await;
    mount_search(&mock_server, three_rows()).await;

    let config = Config {
        http: test_http_config(),
        georgia_gpr: gpr_config(&mock_server.uri()),
        ..Config::default()
    };

    let mut engine = Engine::new();
    let registered = register_enabled(&mut engine, &config).expect("registration failed");
    assert_eq!(registered, 1);

    let report = engine.run(CancellationToken::new()).await;
    assert_eq!(report.total_items(), 3);
}
