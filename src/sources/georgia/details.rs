//! Document-link extraction from GPR detail pages
//!
//! Links are matched purely on their target: a document-like file extension
//! or a "download" path fragment. Link text becomes the document title.

use crate::model::Document;
use scraper::{Html, Selector};
use url::Url;

/// File extensions treated as attached documents
const DOCUMENT_SUFFIXES: [&str; 3] = [".pdf", ".docx", ".doc"];

/// Path fragment of the target's download servlet
const DOWNLOAD_FRAGMENT: &str = "download";

/// Extracts every document link from a detail page, in page order
///
/// # Arguments
///
/// * `html` - The detail page markup
/// * `page_url` - The detail page URL, used to resolve relative links
///
/// # Example
///
/// ```
/// use procurement_scout::sources::georgia::extract_documents;
/// use url::Url;
///
/// let html = r#"<a href="/files/spec.pdf">Specification</a>"#;
/// let base = Url::parse("https://example.gov/gpr/eventDetails?x=1").unwrap();
/// let docs = extract_documents(html, &base);
/// assert_eq!(docs[0].url, "https://example.gov/files/spec.pdf");
/// ```
pub fn extract_documents(html: &str, page_url: &Url) -> Vec<Document> {
    let document = Html::parse_document(html);
    let mut documents = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return documents;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_document_link(href) {
            continue;
        }

        let title = element.text().collect::<String>();
        documents.push(Document::file(&title, resolve_href(href, page_url)));
    }

    documents
}

/// Returns true if the href looks like a downloadable document
pub fn is_document_link(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    DOCUMENT_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
        || lower.contains(DOWNLOAD_FRAGMENT)
}

/// Resolves a link against the page URL
///
/// Absolute links pass through `join` unchanged; links that cannot be
/// resolved are kept verbatim.
fn resolve_href(href: &str, page_url: &Url) -> String {
    let href = href.trim();
    match page_url.join(href) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::debug!(href, error = %e, "Keeping unresolvable document link as-is");
            href.to_string()
        }
    }
}
