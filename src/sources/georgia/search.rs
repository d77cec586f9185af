//! Search request construction and response decoding for the GPR
//!
//! The search endpoint is a DataTables server-side handler. It rejects or
//! misreads requests that omit any of the column descriptors, so the form
//! reproduces the full field set even where values are empty.

use crate::model::{RawRecord, Solicitation};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::form_urlencoded;
use url::Url;

/// Column `data` names, in the order the target's table declares them
pub const SEARCH_COLUMNS: [&str; 8] = ["0", "1", "title", "agencyName", "4", "5", "6", "status"];

/// Column the results are sorted by (closing date)
const ORDER_COLUMN: &str = "5";

/// Status filter; only open events are requested
const EVENT_STATUS: &str = "OPEN";

/// Builds the ordered form fields for one search request
///
/// Pagination is fixed at offset 0: one page of `page_size` rows.
pub fn search_form_fields(page_size: u32) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = [
        ("draw", "1".to_string()),
        ("start", "0".to_string()),
        ("length", page_size.to_string()),
        ("search[value]", String::new()),
        ("search[regex]", "false".to_string()),
        ("order[0][column]", ORDER_COLUMN.to_string()),
        ("order[0][dir]", "asc".to_string()),
        ("responseType", String::new()),
        ("eventStatus", EVENT_STATUS.to_string()),
        ("eventIdTitle", String::new()),
        ("govType", String::new()),
        ("govEntity", String::new()),
        ("catType", String::new()),
        ("eventProcessType", String::new()),
        ("dateRangeType", String::new()),
        ("rangeStartDate", String::new()),
        ("rangeEndDate", String::new()),
        ("isReset", "false".to_string()),
        ("persisted", String::new()),
        ("refreshSearchData", "false".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    for (i, name) in SEARCH_COLUMNS.iter().enumerate() {
        fields.push((format!("columns[{i}][data]"), name.to_string()));
        fields.push((format!("columns[{i}][name]"), String::new()));
        fields.push((format!("columns[{i}][searchable]"), "true".to_string()));
        fields.push((format!("columns[{i}][orderable]"), "true".to_string()));
        fields.push((format!("columns[{i}][search][value]"), String::new()));
        fields.push((format!("columns[{i}][search][regex]"), "false".to_string()));
    }

    fields
}

/// Encodes the search form as an `application/x-www-form-urlencoded` body
pub fn encode_search_form(page_size: u32) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(search_form_fields(page_size))
        .finish()
}

/// A DataTables search response
///
/// The row schema belongs to the target, so rows stay free-form and every
/// key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub draw: Value,

    #[serde(rename = "recordsTotal", default, deserialize_with = "lenient_count")]
    pub records_total: u64,

    #[serde(rename = "recordsFiltered", default, deserialize_with = "lenient_count")]
    pub records_filtered: u64,

    #[serde(default)]
    data: Value,
}

impl SearchResponse {
    /// Returns the number of object rows in the payload
    pub fn row_count(&self) -> usize {
        match &self.data {
            Value::Array(rows) => rows.iter().filter(|r| r.is_object()).count(),
            _ => 0,
        }
    }

    /// Consumes the response, yielding each object row in source order
    ///
    /// Non-object entries are skipped.
    pub fn into_rows(self) -> Vec<RawRecord> {
        match self.data {
            Value::Array(rows) => rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Object(map) => Some(map),
                    other => {
                        tracing::debug!(row = %other, "Skipping non-object search row");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Accepts counts encoded as numbers, numeric strings, or null
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Reads a row field as a string
///
/// Strings are returned as-is and numbers are stringified; anything else,
/// including a missing key, yields an empty string.
pub fn row_string(row: &RawRecord, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Builds the detail-page URL for a row, if it carries both identifying keys
pub fn detail_url(details_base: &Url, row: &RawRecord) -> Option<Url> {
    let key = row_string(row, "esourceNumberKey");
    let source_system = row_string(row, "sourceId");
    if key.is_empty() || source_system.is_empty() {
        return None;
    }

    let mut url = details_base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("eSourceNumber", &key)
        .append_pair("sourceSystemType", &source_system);
    Some(url)
}

/// Maps one search row to a solicitation, keeping the row as `raw_data`
pub fn row_to_solicitation(row: RawRecord, details_base: &Url) -> Solicitation {
    let mut sol = Solicitation::new(row_string(&row, "esourceNumber"));
    sol.title = row_string(&row, "title");
    sol.agency = row_string(&row, "agencyName");
    sol.description = row_string(&row, "description");
    if let Some(url) = detail_url(details_base, &row) {
        sol.url = url.to_string();
    }
    sol.raw_data = row;
    sol
}
