//! Georgia Procurement Registry (GPR) adapter
//!
//! - `gpr`: the [`Scraper`](crate::scraper::Scraper) implementation
//! - `search`: DataTables form construction and response decoding
//! - `details`: document-link extraction from detail pages

mod details;
mod gpr;
mod search;

pub use details::{extract_documents, is_document_link};
pub use gpr::GprScraper;
pub use search::{
    detail_url, encode_search_form, row_string, row_to_solicitation, search_form_fields,
    SearchResponse, SEARCH_COLUMNS,
};
