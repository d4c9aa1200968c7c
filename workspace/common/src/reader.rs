//! Loading of the member export.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::record::MemberRecord;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read the JSON file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode the JSON file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the JSON file must contain an array of member records, found {0}")]
    NotAnArray(&'static str),
}

/// Drops every byte outside the ASCII range.
///
/// Exports produced by the access-control system mix encodings; names lose
/// their accented letters but the record stays parseable.
pub fn decode_ascii(bytes: &[u8]) -> String {
    let kept: Vec<u8> = bytes.iter().copied().filter(u8::is_ascii).collect();
    // Only ASCII bytes remain, so this cannot fail.
    String::from_utf8(kept).unwrap_or_default()
}

/// Parses raw export bytes into records, keeping their order.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<MemberRecord>, SourceError> {
    let text = decode_ascii(bytes);
    trace!("Decoded {} of {} bytes as ASCII", text.len(), bytes.len());

    let value: serde_json::Value = serde_json::from_str(&text)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(_) => return Err(SourceError::NotAnArray("an object")),
        serde_json::Value::String(_) => return Err(SourceError::NotAnArray("a string")),
        serde_json::Value::Number(_) => return Err(SourceError::NotAnArray("a number")),
        serde_json::Value::Bool(_) => return Err(SourceError::NotAnArray("a boolean")),
        serde_json::Value::Null => return Err(SourceError::NotAnArray("null")),
    };

    let records = items
        .into_iter()
        .map(serde_json::from_value::<MemberRecord>)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} member records", records.len());

    Ok(records)
}

pub fn read_records(path: &Path) -> Result<Vec<MemberRecord>, SourceError> {
    info!("Reading member records from {}", path.display());
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&bytes)
}
