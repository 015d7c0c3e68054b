//! Result ordering and highlight aggregation.
//!
//! Dictionary iteration order carries no textual meaning, so every list of
//! findings is re-sorted by where it first touches the normalized text
//! before it leaves the engine. The highlight sets tell a renderer which
//! character positions to mark; a position may be in both sets.
use serde::Serialize;
use std::collections::BTreeSet;

use crate::results::{FixedGroup, FixedOutput, MatchRecord};

/// Anything anchored at positions of the normalized text
pub trait Located {
    fn first_position(&self) -> Option<usize>;
}

impl Located for MatchRecord {
    fn first_position(&self) -> Option<usize> {
        MatchRecord::first_position(self)
    }
}

impl Located for FixedGroup {
    fn first_position(&self) -> Option<usize> {
        self.source_indices.iter().copied().min()
    }
}

/// Stable sort by first position; items without positions go last.
pub fn order_by_first_occurrence<T: Located>(items: &mut [T]) {
    items.sort_by_key(|item| item.first_position().unwrap_or(usize::MAX));
}

/// How a renderer should mark one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Fixed,
    Semantic,
    Both,
}

/// Positions touched by fixed-mode output and by cross-search matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightIndices {
    pub fixed: BTreeSet<usize>,
    pub semantic: BTreeSet<usize>,
}

impl HighlightIndices {
    pub fn classify(&self, index: usize) -> Highlight {
        match (self.fixed.contains(&index), self.semantic.contains(&index)) {
            (true, true) => Highlight::Both,
            (true, false) => Highlight::Fixed,
            (false, true) => Highlight::Semantic,
            (false, false) => Highlight::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.semantic.is_empty()
    }
}

/// Unions the positions of both extraction outputs into highlight sets
pub fn aggregate_highlights(fixed: &FixedOutput, cross_matches: &[MatchRecord]) -> HighlightIndices {
    HighlightIndices {
        fixed: fixed.positions().collect(),
        semantic: cross_matches
            .iter()
            .flat_map(|m| m.positions.iter().copied())
            .collect(),
    }
}
