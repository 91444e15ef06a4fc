//! Matching view descriptions against the fee glossary

use serde::{Deserialize, Serialize};

use super::similarity::{preprocess, weighted_ratio_processed};
use super::Glossary;
use crate::types::*;

/// Best glossary term for a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryMatch {
    /// Glossary term as written in the glossary
    pub term: String,
    /// Similarity on a 0..=100 scale
    pub score: u8,
}

/// Highest scoring glossary term for `text`
///
/// Ties keep the earliest term. Returns `None` for empty text or glossary.
pub fn best_match(text: &str, glossary: &Glossary) -> Option<GlossaryMatch> {
    let query = preprocess(text);
    if query.is_empty() || glossary.is_empty() {
        return None;
    }

    let mut best: Option<GlossaryMatch> = None;
    for (term, processed) in glossary.entries() {
        let score = weighted_ratio_processed(&query, &processed);
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(GlossaryMatch {
                term: term.to_string(),
                score,
            });
            if score == 100 {
                break;
            }
        }
    }
    best
}

/// True when the best glossary score of `text` reaches `threshold`
pub fn matches(text: &str, glossary: &Glossary, threshold: u8) -> bool {
    best_match(text, glossary).is_some_and(|m| m.score >= threshold)
}

/// New view with the rows whose description matches the glossary
pub fn filter_view(view: &View, glossary: &Glossary, threshold: u8) -> View {
    let filtered = view.filtered(|row| matches(&row.description, glossary, threshold));
    tracing::info!(
        kind = ?view.kind(),
        threshold,
        matched = filtered.len(),
        of = view.len(),
        "glossary filter applied"
    );
    filtered
}
