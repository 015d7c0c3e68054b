//! Equidistant sampling.
//!
//! [`sample`] is the one primitive every extractor builds on. It walks the
//! normalized buffer by stride and never copies more than it emits.
use serde::Serialize;

use crate::text::NormalizedText;

/// Characters taken at `start_offset, start_offset + skip, ...` together with
/// the normalized position each one came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquidistantSequence {
    skip: usize,
    start_offset: usize,
    sampled: String,
    source_indices: Vec<usize>,
}

impl EquidistantSequence {
    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Sampled characters concatenated into one searchable stream
    pub fn as_str(&self) -> &str {
        &self.sampled
    }

    /// `source_indices()[i]` is the normalized position of the i-th sampled character
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Number of sampled characters
    pub fn len(&self) -> usize {
        self.source_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }

    /// Maps a byte offset into [`as_str`](Self::as_str) to a sample index.
    pub fn sample_index(&self, byte_offset: usize) -> usize {
        if self.sampled.len() == self.source_indices.len() {
            // ASCII stream: bytes and chars line up
            byte_offset
        } else {
            self.sampled[..byte_offset].chars().count()
        }
    }

    /// Normalized positions covered by a match of `char_len` characters that
    /// starts at `byte_offset` in the sampled stream.
    pub fn span_positions(&self, byte_offset: usize, char_len: usize) -> &[usize] {
        let start = self.sample_index(byte_offset);
        let end = start + char_len;
        assert!(
            end <= self.source_indices.len(),
            "match span {start}..{end} exceeds sampled length {}",
            self.source_indices.len()
        );
        &self.source_indices[start..end]
    }
}

/// Number of characters `sample(text, skip, start_offset)` yields
pub fn sampled_len(text_len: usize, skip: usize, start_offset: usize) -> usize {
    if text_len <= start_offset {
        0
    } else {
        (text_len - start_offset).div_ceil(skip)
    }
}

/// Samples `text` every `skip` characters starting at `start_offset`.
///
/// `skip` must be positive and `start_offset` lies in `[0, skip)`; both are
/// guaranteed by configuration validation, so a violation is a bug.
pub fn sample(text: &NormalizedText, skip: usize, start_offset: usize) -> EquidistantSequence {
    assert!(skip > 0, "skip must be positive");
    debug_assert!(start_offset < skip, "start offset {start_offset} outside [0, {skip})");

    let chars = text.chars();
    let capacity = sampled_len(chars.len(), skip, start_offset);
    let mut sampled = String::with_capacity(capacity);
    let mut source_indices = Vec::with_capacity(capacity);

    for index in (start_offset..chars.len()).step_by(skip) {
        sampled.push(chars[index]);
        source_indices.push(index);
    }

    EquidistantSequence {
        skip,
        start_offset,
        sampled,
        source_indices,
    }
}
