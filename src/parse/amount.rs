//! Amounts written with `.` as thousands separator and `,` as decimal separator
//!
//! Every conversion between statement text and numbers goes through this
//! module; the rest of the crate never rewrites amount strings by hand.

use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Currency marker that may prefix an amount
pub const CURRENCY_MARKER: &str = "R$";

/// Parse an amount, returning `None` when the text is not a number
pub fn try_parse(text: &str) -> Option<BigDecimal> {
    let cleaned: String = text
        .replace(CURRENCY_MARKER, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if !is_plain_decimal(&cleaned) {
        return None;
    }

    BigDecimal::from_str(&cleaned).ok()
}

/// Optional leading `-`, then digits with at most one `.`
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

/// Parse an amount, treating malformed or empty text as zero
pub fn parse(text: &str) -> BigDecimal {
    match try_parse(text) {
        Some(value) => value,
        None => {
            if !text.trim().is_empty() {
                tracing::debug!(cell = text, "unparseable amount counted as zero");
            }
            BigDecimal::from(0)
        }
    }
}

/// Render a value with two fraction digits, e.g. `1234.5` as `1.234,50`
pub fn format(value: &BigDecimal) -> String {
    let (digits, _) = value.round(2).with_scale(2).as_bigint_and_exponent();
    let digits = digits.to_string();
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.as_str()),
    };
    let padded = format!("{digits:0>3}");
    let (integer, fraction) = padded.split_at(padded.len() - 2);

    let mut out = String::with_capacity(padded.len() + padded.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    out.push(',');
    out.push_str(fraction);
    out
}

fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Re-render an amount cell in canonical form
pub fn normalize(text: &str) -> String {
    format(&parse(text))
}
