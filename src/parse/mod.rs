//! Locale-aware parsing of statement cells

pub mod amount;
pub mod date;

pub use date::DateKey;
