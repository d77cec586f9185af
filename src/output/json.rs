//! JSON export of scraped records
//!
//! The file is a plain array of solicitations; deduplication and upserts are
//! left to whatever consumes it.

use crate::model::Solicitation;
use crate::ScoutError;
use std::path::Path;

/// Serializes records as pretty-printed JSON
pub fn to_json(solicitations: &[Solicitation]) -> Result<String, ScoutError> {
    Ok(serde_json::to_string_pretty(solicitations)?)
}

/// Writes records to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(ScoutError)` - Serialization or IO failure
pub fn write_json(solicitations: &[Solicitation], path: &Path) -> Result<(), ScoutError> {
    let json = to_json(solicitations)?;
    std::fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        count = solicitations.len(),
        "Wrote solicitations"
    );
    Ok(())
}
