//! One-line record encoding.
//!
//! Every record occupies exactly one JSON object line in its table file.
//! Decoding is forgiving: a line that does not parse into the
//! expected record shape yields `None` rather than an error, which is the
//! system's sole defense against partial-write corruption.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Encode a record as a single self-contained line.
///
/// The output never contains a raw line terminator: `serde_json` escapes
/// control characters inside string values, so the line boundary stays the
/// record boundary.
pub fn encode<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Decode one line into a record.
///
/// Returns `None` for blank lines, truncated writes, and structurally
/// invalid content. Never panics and never returns an error.
pub fn decode<T: DeserializeOwned>(line: &str) -> Option<T> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}
