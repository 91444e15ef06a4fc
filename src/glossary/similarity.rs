//! Weighted fuzzy similarity between two short descriptions
//!
//! Scores are on a 0..=100 scale. The weighted score takes the best of a
//! plain indel ratio and several token-based variants, each scaled down so
//! that an exact character match always wins over a reordered one.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Lower-case, fold Portuguese accents and collapse non-alphanumerics to single spaces
pub fn preprocess(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Indel similarity of two already processed strings
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b).round() as u8
}

/// Best ratio of the shorter string against every same-length window of the longer one
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        best = best.max(ratio_chars(&short, window));
        if best >= 100.0 {
            break;
        }
    }
    best.round() as u8
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool) -> u8 {
    let (a, b) = (sorted_tokens(a), sorted_tokens(b));
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> u8 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let sect = join(ta.intersection(&tb).copied().collect());
    let only_a = join(ta.difference(&tb).copied().collect());
    let only_b = join(tb.difference(&ta).copied().collect());

    let combined_a = format!("{} {}", sect, only_a).trim().to_string();
    let combined_b = format!("{} {}", sect, only_b).trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    score(&sect, &combined_a)
        .max(score(&sect, &combined_b))
        .max(score(&combined_a, &combined_b))
}

/// Token-order independent ratio
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    token_sort(&preprocess(a), &preprocess(b), false)
}

/// Ratio on shared tokens plus the remainders of each side
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(&preprocess(a), &preprocess(b), false)
}

/// Weighted similarity of two raw strings
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    weighted_ratio_processed(&preprocess(a), &preprocess(b))
}

/// Weighted similarity of two strings already passed through [`preprocess`]
pub fn weighted_ratio_processed(a: &str, b: &str) -> u8 {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a == 0 || len_b == 0 {
        return 0;
    }

    let base = f64::from(ratio(a, b));
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    let best = if len_ratio < 1.5 {
        let sorted = f64::from(token_sort(a, b, false)) * UNBASE_SCALE;
        let set = f64::from(token_set(a, b, false)) * UNBASE_SCALE;
        base.max(sorted).max(set)
    } else {
        let partial_scale = if len_ratio > 8.0 {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        let partial = f64::from(partial_ratio(a, b)) * partial_scale;
        let sorted = f64::from(token_sort(a, b, true)) * UNBASE_SCALE * partial_scale;
        let set = f64::from(token_set(a, b, true)) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(sorted).max(set)
    };

    best.round() as u8
}
