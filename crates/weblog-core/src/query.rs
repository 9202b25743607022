//! Sorting and pagination shared by the listing operations.

use chrono::{NaiveDateTime, Utc};

/// Timestamp format used by every entity file.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in the store's timestamp format.
pub fn now_stamp() -> String {
    Utc::now().format(STAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. `None` for anything unparsable; callers treat
/// that as "oldest", never as a failure.
pub fn parse_stamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), STAMP_FORMAT).ok()
}

/// One page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// The first page of the given size.
    pub fn first(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }
}

/// Stable descending sort on a timestamp field (newest first).
///
/// Unparsable timestamps compare as oldest, and ties keep file order, so
/// the result is deterministic for any input.
pub fn sort_newest_first<T, F>(records: &mut [T], stamp: F)
where
    F: Fn(&T) -> &str,
{
    records.sort_by(|a, b| parse_stamp(stamp(b)).cmp(&parse_stamp(stamp(a))));
}

/// Clamped `[offset, offset + limit)` slice of an already-sorted listing.
/// An out-of-range offset yields an empty page, not an error.
pub fn paginate<T>(records: Vec<T>, page: Page) -> Vec<T> {
    if page.offset >= records.len() {
        return Vec::new();
    }
    records
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect()
}
