use crate::sample::EquidistantSequence;

/// Locates one dictionary term inside equidistant streams and maps every
/// hit back to normalized-text positions.
#[derive(Debug, Clone, Copy)]
pub struct TermMatcher<'t> {
    term: &'t str,
    char_len: usize,
}

impl<'t> TermMatcher<'t> {
    pub fn new(term: &'t str) -> Self {
        debug_assert!(!term.is_empty(), "dictionary terms are never empty");
        Self {
            term,
            char_len: term.chars().count(),
        }
    }

    pub fn term(&self) -> &'t str {
        self.term
    }

    /// Length of the term in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether the stream can hold the term at all
    #[inline]
    pub fn fits(&self, sequence_len: usize) -> bool {
        sequence_len >= self.char_len
    }

    /// Positions of the leftmost occurrence
    pub fn find_first<'s>(&self, sequence: &'s EquidistantSequence) -> Option<&'s [usize]> {
        if !self.fits(sequence.len()) {
            return None;
        }
        sequence
            .as_str()
            .find(self.term)
            .map(|byte_offset| sequence.span_positions(byte_offset, self.char_len))
    }

    /// Positions of every non-overlapping occurrence, left to right
    pub fn find_all<'s>(
        &self,
        sequence: &'s EquidistantSequence,
    ) -> impl Iterator<Item = &'s [usize]> + 's
    where
        't: 's,
    {
        let term: &'s str = self.term;
        let char_len = self.char_len;
        sequence
            .as_str()
            .match_indices(term)
            .map(move |(byte_offset, _)| sequence.span_positions(byte_offset, char_len))
    }
}
