//! Georgia Procurement Registry scraper
//!
//! A scrape runs in three phases against one stateful target:
//! 1. Fetch the landing page so the client holds a session cookie
//! 2. POST the DataTables search form and decode the rows
//! 3. Visit each row's detail page, one at a time, collecting document links
//!
//! Phases 1 and 2 are fatal on failure. Phase 3 failures only cost the
//! affected item its documents.

use crate::config::{GprConfig, HttpConfig};
use crate::http::{build_session_client, read_text_cancellable, send_cancellable, sleep_cancellable};
use crate::model::Solicitation;
use crate::scraper::{AdapterState, RunState, ScrapeError, Scraper};
use crate::sources::georgia::details::extract_documents;
use crate::sources::georgia::search::{encode_search_form, row_to_solicitation, SearchResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::{Client, RequestBuilder, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Scraper for the Georgia Procurement Registry
pub struct GprScraper {
    config: GprConfig,
    client: Client,
    base_url: Url,
    search_url: Url,
    details_url: Url,
    origin: String,
}

impl GprScraper {
    /// Name reported to the engine and used in logs
    pub const NAME: &'static str = "Georgia Procurement Registry (GPR)";

    /// Creates a scraper with its own session client
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints, page size and politeness delay
    /// * `http` - Shared client settings (user agent, timeouts)
    pub fn new(config: GprConfig, http: &HttpConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url)?;
        let search_url = Url::parse(&config.search_url)?;
        let details_url = Url::parse(&config.details_url)?;
        let origin = base_url.origin().ascii_serialization();
        let client = build_session_client(http)?;

        Ok(Self {
            config,
            client,
            base_url,
            search_url,
            details_url,
            origin,
        })
    }

    /// Creates a scraper pointed at the live registry
    pub fn with_defaults() -> Result<Self, ScrapeError> {
        Self::new(GprConfig::default(), &HttpConfig::default())
    }

    /// Adds the header set the target expects on every request
    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(ORIGIN, self.origin.as_str())
    }

    /// Fetches the landing page so the client picks up a session cookie
    async fn establish_session(&self, token: &CancellationToken) -> Result<(), ScrapeError> {
        let request = self.with_headers(self.client.get(self.base_url.clone()));

        let response = match send_cancellable(token, request).await {
            Ok(response) => response,
            Err(ScrapeError::Http(source)) => {
                return Err(ScrapeError::Session {
                    url: self.base_url.to_string(),
                    source,
                })
            }
            Err(e) => return Err(e),
        };

        if !response.status().is_success() {
            tracing::warn!(
                url = %self.base_url,
                status = response.status().as_u16(),
                "Landing page returned non-success status"
            );
        }

        Ok(())
    }

    /// Posts the search form and decodes the result page
    async fn search(&self, token: &CancellationToken) -> Result<SearchResponse, ScrapeError> {
        let request = self
            .with_headers(self.client.post(self.search_url.clone()))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, self.base_url.as_str())
            .body(encode_search_form(self.config.page_size));

        let response = send_cancellable(token, request).await?;
        let status = response.status();
        let body = read_text_cancellable(token, response).await?;

        if status != StatusCode::OK {
            return Err(ScrapeError::Search {
                status: status.as_u16(),
                body_len: body.len(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches a solicitation's detail page and appends its documents
    ///
    /// Does nothing for records without a detail URL.
    pub async fn scrape_details(
        &self,
        token: &CancellationToken,
        sol: &mut Solicitation,
    ) -> Result<(), ScrapeError> {
        if !sol.has_detail_url() {
            return Ok(());
        }

        let page_url = Url::parse(&sol.url)?;
        let request = self.with_headers(self.client.get(page_url.clone()));
        let response = send_cancellable(token, request).await?;

        if response.status() != StatusCode::OK {
            return Err(ScrapeError::Detail {
                url: sol.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let html = read_text_cancellable(token, response).await?;
        let documents = extract_documents(&html, &page_url);
        tracing::debug!(
            source_id = %sol.source_id,
            documents = documents.len(),
            "Parsed detail page"
        );
        sol.documents.extend(documents);

        Ok(())
    }

    /// Waits out the politeness delay, then enriches one record
    async fn enrich(
        &self,
        token: &CancellationToken,
        sol: &mut Solicitation,
    ) -> Result<(), ScrapeError> {
        sleep_cancellable(token, self.config.politeness_delay()).await?;
        self.scrape_details(token, sol).await
    }
}

#[async_trait]
impl Scraper for GprScraper {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn scrape(&self, token: CancellationToken) -> Result<Vec<Solicitation>, ScrapeError> {
        let mut state = RunState::new(Self::NAME);
        tracing::info!(url = %self.base_url, "Starting GPR scrape");

        if let Err(e) = self.establish_session(&token).await {
            state.advance(AdapterState::Failed);
            return Err(e);
        }
        state.advance(AdapterState::SessionEstablished);

        state.advance(AdapterState::Searching);
        let response = match self.search(&token).await {
            Ok(response) => response,
            Err(e) => {
                state.advance(AdapterState::Failed);
                return Err(e);
            }
        };

        let fetched = response.row_count();
        tracing::info!(
            total_records = response.records_total,
            filtered_records = response.records_filtered,
            fetched,
            "GPR data received"
        );
        if response.records_filtered > fetched as u64 {
            // Only the first page is requested.
            tracing::warn!(
                filtered_records = response.records_filtered,
                fetched,
                "Search matched more rows than one page holds; extra rows not retrieved"
            );
        }

        let mut solicitations = Vec::with_capacity(fetched);
        let mut enrichment_cancelled = false;

        for row in response.into_rows() {
            let mut sol = row_to_solicitation(row, &self.details_url);

            if sol.has_detail_url() && !enrichment_cancelled {
                state.advance(AdapterState::ItemEnriching);
                match self.enrich(&token, &mut sol).await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => {
                        tracing::warn!(
                            source_id = %sol.source_id,
                            "Cancelled during detail enrichment; keeping remaining items without documents"
                        );
                        enrichment_cancelled = true;
                    }
                    Err(e) => {
                        tracing::warn!(
                            source_id = %sol.source_id,
                            error = %e,
                            "Failed to scrape details"
                        );
                    }
                }
            }

            solicitations.push(sol);
        }

        state.advance(AdapterState::Done);
        Ok(solicitations)
    }
}
