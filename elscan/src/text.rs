//! Text normalization.
//!
//! Every position reported by the engine is an index into a
//! [`NormalizedText`]: the section text with whitespace removed, case folded
//! to lowercase and, when punctuation stripping is enabled, reduced to
//! alphanumeric characters. Indices count `char`s, not bytes, so accented
//! letters occupy a single position.
use serde::{Deserialize, Serialize};

/// Which characters survive normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Remove whitespace and lowercase, keep punctuation
    Compact,
    /// Remove whitespace, lowercase and drop every non-alphanumeric character
    #[default]
    Alphanumeric,
}

impl NormalizationPolicy {
    pub fn from_strip_punctuation(strip_punctuation: bool) -> Self {
        if strip_punctuation {
            Self::Alphanumeric
        } else {
            Self::Compact
        }
    }

    #[inline]
    fn keeps(self, c: char) -> bool {
        match self {
            Self::Compact => !c.is_whitespace(),
            Self::Alphanumeric => c.is_alphanumeric(),
        }
    }
}

/// Immutable character buffer that all sampling works on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    chars: Vec<char>,
}

impl NormalizedText {
    /// Number of characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at a normalized position
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Turns raw section text into a [`NormalizedText`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    policy: NormalizationPolicy,
}

impl TextNormalizer {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NormalizationPolicy {
        self.policy
    }

    /// Normalizes a whole section
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        NormalizedText {
            chars: self.normalize_chars(raw).collect(),
        }
    }

    /// Normalizes a dictionary term with the same rules as the text
    pub fn normalize_term(&self, term: &str) -> String {
        self.normalize_chars(term).collect()
    }

    fn normalize_chars<'a>(&self, raw: &'a str) -> impl Iterator<Item = char> + 'a {
        let policy = self.policy;
        // Lowercasing can expand a char (e.g. 'İ' -> "i\u{307}"), so filter afterwards.
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .filter(move |&c| policy.keeps(c))
    }
}
