//! Timestamp inputs for point-in-time banner lookups.
//!
//! Game end times arrive either as structured instants or in the compact
//! `YYYYMMDDHHMMSS` log form, optionally suffixed with a daylight/standard
//! marker (`D` or `S`) that carries no information here. The caller resolves
//! the variant before querying the index; the index itself only ever sees
//! [`chrono::NaiveDateTime`].

use crate::error::{Result, TourneyError};
use chrono::NaiveDateTime;

const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// A point in time supplied by a caller.
#[derive(Debug, Clone, Copy)]
pub enum Timestamp<'a> {
    Instant(NaiveDateTime),
    Compact(&'a str),
}

impl Timestamp<'_> {
    /// Resolve to a structured instant, parsing the compact form if needed.
    pub fn resolve(self) -> Result<NaiveDateTime> {
        match self {
            Timestamp::Instant(at) => Ok(at),
            Timestamp::Compact(text) => parse_compact(text),
        }
    }
}

/// Parse the compact `YYYYMMDDHHMMSS` form, stripping one trailing `D` or
/// `S` marker first.
pub fn parse_compact(text: &str) -> Result<NaiveDateTime> {
    let digits = text
        .strip_suffix(|c| c == 'D' || c == 'S')
        .unwrap_or(text);
    NaiveDateTime::parse_from_str(digits, COMPACT_FORMAT)
        .map_err(|_| TourneyError::MalformedTimestamp(text.to_string()))
}
