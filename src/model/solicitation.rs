use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The source record exactly as the target returned it
pub type RawRecord = Map<String, Value>;

/// A scraped procurement opportunity
///
/// `source_id` is the only identity a downstream upsert may rely on. No
/// database identifier exists at scrape time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solicitation {
    /// Identifier unique within the source site
    pub source_id: String,

    pub title: String,

    pub description: String,

    pub agency: String,

    /// Closing date, `None` when the source does not say
    pub due_date: Option<DateTime<Utc>>,

    /// Canonical detail-page link, empty when it could not be built
    pub url: String,

    /// Documents in the order they were found on the detail page
    pub documents: Vec<Document>,

    /// The raw search row, kept for auditing and for unmodeled fields
    pub raw_data: RawRecord,
}

impl Solicitation {
    /// Creates an empty record for the given source identifier
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            ..Self::default()
        }
    }

    /// Returns true if a detail page can be fetched for this record
    pub fn has_detail_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// A file attached to a solicitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,

    /// Absolute URL, resolved against the detail page
    pub url: String,

    /// Free-form classification
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl Document {
    /// Title used when the link has no text
    pub const DEFAULT_TITLE: &'static str = "Document";

    /// Classification given to every linked file
    pub const FILE_TYPE: &'static str = "file";

    /// Creates a file document, falling back to the default title
    pub fn file(title: &str, url: impl Into<String>) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                Self::DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            url: url.into(),
            doc_type: Self::FILE_TYPE.to_string(),
        }
    }
}
