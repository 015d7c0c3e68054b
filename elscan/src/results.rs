//! Result types handed to report renderers.
//!
//! All positions are indices into the section's normalized text. The types
//! are plain owned values: a result is built once per section and is
//! read-only afterwards.
use serde::Serialize;

use crate::highlight::HighlightIndices;

/// One occurrence of a dictionary term inside an equidistant stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// The matched term (normalized)
    pub term: String,
    /// Interval between sampled characters
    pub skip: usize,
    /// Phase of the stream the term was found in
    pub start_offset: usize,
    /// Normalized positions spelling the term, in order
    pub positions: Vec<usize>,
}

impl MatchRecord {
    /// Position of the first character of the match
    pub fn first_position(&self) -> Option<usize> {
        self.positions.iter().copied().min()
    }
}

/// A fixed-size cluster of sampled characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixedGroup {
    pub cluster: String,
    pub source_indices: Vec<usize>,
}

/// Output of the fixed-skip extraction mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixedOutput {
    /// The normalized text is shorter than the skip
    TooShort { text_len: usize, skip: usize },
    /// Triplet grouping
    Groups { groups: Vec<FixedGroup> },
    /// Dictionary terms found in the single skip stream
    Hits { hits: Vec<MatchRecord> },
}

impl FixedOutput {
    pub fn is_too_short(&self) -> bool {
        matches!(self, Self::TooShort { .. })
    }

    /// Number of groups or hits
    pub fn len(&self) -> usize {
        match self {
            Self::TooShort { .. } => 0,
            Self::Groups { groups } => groups.len(),
            Self::Hits { hits } => hits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every normalized position referenced by the output
    pub fn positions(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            Self::TooShort { .. } => Box::new(std::iter::empty()),
            Self::Groups { groups } => {
                Box::new(groups.iter().flat_map(|g| g.source_indices.iter().copied()))
            }
            Self::Hits { hits } => Box::new(hits.iter().flat_map(|h| h.positions.iter().copied())),
        }
    }
}

/// Everything the engine found in one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Length of the normalized text all positions refer to
    pub normalized_len: usize,
    pub fixed: FixedOutput,
    pub cross_search_matches: Vec<MatchRecord>,
    pub highlights: HighlightIndices,
}

/// A section's title and the result computed from its text
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub title: String,
    pub result: ExtractionResult,
}

/// Results for a whole document, in document order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    pub sections: Vec<SectionReport>,
    /// Total number of fixed-mode groups or hits
    pub total_fixed: usize,
    /// Total number of cross-search matches
    pub total_cross_matches: usize,
    /// Sections whose text was too short for the fixed mode
    pub sections_too_short: usize,
}

impl DocumentReport {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a section report and updates the totals
    pub fn add_section(&mut self, report: SectionReport) {
        self.total_fixed += report.result.fixed.len();
        self.total_cross_matches += report.result.cross_search_matches.len();
        if report.result.fixed.is_too_short() {
            self.sections_too_short += 1;
        }
        self.sections.push(report);
    }

    pub fn to_json_pretty(&self) -> crate::ElsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, skip: usize, positions: Vec<usize>) -> MatchRecord {
        MatchRecord {
            term: term.to_string(),
            skip,
            start_offset: positions.first().map_or(0, |p| p % skip),
            positions,
        }
    }

    fn section(title: &str, fixed: FixedOutput, matches: Vec<MatchRecord>) -> SectionReport {
        SectionReport {
            title: title.to_string(),
            result: ExtractionResult {
                normalized_len: 100,
                fixed,
                cross_search_matches: matches,
                highlights: HighlightIndices::default(),
            },
        }
    }

    #[test]
    fn test_first_position() {
        let m = record("luce", 3, vec![1, 4, 7, 10]);
        assert_eq!(m.first_position(), Some(1));
        assert_eq!(record("x", 1, vec![]).first_position(), None);
    }

    #[test]
    fn test_fixed_output_positions() {
        let groups = FixedOutput::Groups {
            groups: vec![
                FixedGroup {
                    cluster: "pse".to_string(),
                    source_indices: vec![0, 5, 10],
                },
                FixedGroup {
                    cluster: "ioe".to_string(),
                    source_indices: vec![15, 20, 25],
                },
            ],
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups.positions().collect::<Vec<_>>(),
            vec![0, 5, 10, 15, 20, 25]
        );

        let short = FixedOutput::TooShort {
            text_len: 3,
            skip: 50,
        };
        assert!(short.is_too_short());
        assert!(short.is_empty());
        assert_eq!(short.positions().count(), 0);
    }

    #[test]
    fn test_document_report_totals() {
        let mut report = DocumentReport::new();
        report.add_section(section(
            "Inferno",
            FixedOutput::Hits {
                hits: vec![record("vita", 2, vec![0, 2, 4, 6])],
            },
            vec![record("luce", 3, vec![1, 4, 7, 10]), record("luce", 7, vec![12, 19, 26, 33])],
        ));
        report.add_section(section(
            "Coda",
            FixedOutput::TooShort {
                text_len: 4,
                skip: 50,
            },
            vec![],
        ));

        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.total_fixed, 1);
        assert_eq!(report.total_cross_matches, 2);
        assert_eq!(report.sections_too_short, 1);
    }

    #[test]
    fn test_serializes_fixed_output_kind() {
        let output = FixedOutput::TooShort {
            text_len: 4,
            skip: 50,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "too_short");
        assert_eq!(json["skip"], 50);
    }
}
