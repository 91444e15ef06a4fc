//! Statement dates in `DD/MM/YY` and `DD/MM/YYYY` form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical date format used throughout the pipeline
pub const CANONICAL_FORMAT: &str = "%d/%m/%y";

/// Chronological sort key of a date cell
///
/// `Unknown` orders after every known date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DateKey {
    Known(NaiveDate),
    Unknown,
}

impl DateKey {
    pub fn is_known(&self) -> bool {
        matches!(self, DateKey::Known(_))
    }
}

/// Shorten a four digit year to its last two digits
///
/// Anything that is not a `DD/MM/YYYY` string is returned unchanged.
pub fn to_two_digit_year(text: &str) -> String {
    let parts: Vec<&str> = text.split('/').collect();
    match parts.as_slice() {
        [day, month, year] if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{}/{}/{}", day, month, &year[2..])
        }
        _ => text.to_string(),
    }
}

/// Parse a date cell into a calendar date
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&to_two_digit_year(text), CANONICAL_FORMAT).ok()
}

/// Sort key of a date cell; empty and malformed cells are `Unknown`
pub fn sort_key(text: &str) -> DateKey {
    parse_date(text).map_or(DateKey::Unknown, DateKey::Known)
}

/// Sort key of an optional date cell
pub fn sort_key_opt(text: Option<&str>) -> DateKey {
    text.map_or(DateKey::Unknown, sort_key)
}

/// Render a calendar date in canonical form
pub fn render(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Canonical rendering of a date cell, or the cell unchanged if it does not parse
pub fn canonicalize(text: &str) -> String {
    parse_date(text).map_or_else(|| text.to_string(), render)
}
