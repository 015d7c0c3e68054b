//! Term dictionary used by the saltatory extractor and the cross-search.
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::text::{NormalizationPolicy, TextNormalizer};

/// Keywords scanned when no dictionary is supplied
pub const CLASSIC_TERMS: [&str; 12] = [
    "dio", "vita", "morte", "amore", "pace", "guerra", "luce", "buio", "bene", "male", "verità",
    "fede",
];

/// Normalized, de-duplicated, length-filtered terms in input order.
///
/// Cloning is cheap; the term list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    terms: Arc<[String]>,
}

impl Dictionary {
    /// Builds a dictionary, normalizing each term like the text it will be
    /// searched in and keeping only terms with at least `min_term_length`
    /// characters.
    pub fn new<I, S>(terms: I, min_term_length: usize, policy: NormalizationPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = TextNormalizer::new(policy);
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0usize;

        for term in terms {
            let term = normalizer.normalize_term(term.as_ref());
            let length = term.chars().count();
            if length == 0 || length < min_term_length {
                dropped += 1;
                continue;
            }
            if seen.insert(term.clone()) {
                kept.push(term);
            }
        }

        debug!(
            "Dictionary built with {} terms ({} dropped by length)",
            kept.len(),
            dropped
        );

        Self { terms: kept.into() }
    }

    /// The classic keyword list, filtered like any other dictionary
    pub fn classic(min_term_length: usize, policy: NormalizationPolicy) -> Self {
        Self::new(CLASSIC_TERMS, min_term_length, policy)
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

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_short_terms() {
        let dict = Dictionary::new(["dio", "vita", "amore"], 4, NormalizationPolicy::Alphanumeric);
        assert_eq!(dict.terms(), &["vita".to_string(), "amore".to_string()]);
    }

    #[test]
    fn test_normalizes_and_deduplicates() {
        let dict = Dictionary::new(
            ["Luce", "luce ", "L'amore", "fede", "FEDE"],
            1,
            NormalizationPolicy::Alphanumeric,
        );
        let terms: Vec<&str> = dict.iter().collect();
        assert_eq!(terms, vec!["luce", "lamore", "fede"]);
    }

    #[test]
    fn test_drops_terms_empty_after_normalization() {
        let dict = Dictionary::new(["...", "  ", "pace"], 1, NormalizationPolicy::Alphanumeric);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_length_counts_chars() {
        // "verità" is six chars but seven bytes
        let dict = Dictionary::new(["verità"], 7, NormalizationPolicy::Alphanumeric);
        assert!(dict.is_empty());
        let dict = Dictionary::new(["verità"], 6, NormalizationPolicy::Alphanumeric);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_classic_terms() {
        let all = Dictionary::classic(1, NormalizationPolicy::Alphanumeric);
        assert_eq!(all.len(), CLASSIC_TERMS.len());

        // "dio" is the only classic term shorter than four characters
        let long = Dictionary::classic(4, NormalizationPolicy::Alphanumeric);
        assert_eq!(long.len(), CLASSIC_TERMS.len() - 1);
        assert!(!long.iter().any(|t| t == "dio"));
    }
}
