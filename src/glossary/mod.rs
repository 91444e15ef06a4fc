//! Fee glossary and fuzzy description matching

pub mod matcher;
pub mod similarity;

pub use matcher::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Known fee descriptions, in file order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Glossary {
    terms: Vec<String>,
    #[serde(skip)]
    processed: Vec<String>,
}

impl Glossary {
    /// Build a glossary, skipping blank and duplicate terms
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        let processed = terms.iter().map(|t| similarity::preprocess(t)).collect();
        Self { terms, processed }
    }

    /// Parse a glossary with one term per line
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Read a glossary file
    pub fn try_load(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Read a glossary file; a missing or unreadable file yields an empty glossary
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(glossary) => {
                tracing::info!(path = %path.display(), terms = glossary.len(), "glossary loaded");
                glossary
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "glossary unavailable, nothing will match");
                Self::default()
            }
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms paired with their preprocessed form
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.terms.iter().enumerate().map(move |(i, term)| {
            let processed = self
                .processed
                .get(i)
                .cloned()
                .unwrap_or_else(|| similarity::preprocess(term));
            (term.as_str(), processed)
        })
    }
}
