pub mod analyzer;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod extract;
pub mod highlight;
pub mod metrics;
pub mod results;
pub mod sample;
pub mod search;
pub mod text;

pub use analyzer::{Analyzer, Document, Section};
pub use config::{BandMode, CliOverrides, ElsConfig};
pub use dictionary::Dictionary;
pub use errors::{ElsError, ElsResult};
pub use extract::FixedMode;
pub use highlight::{Highlight, HighlightIndices};
pub use results::{
    DocumentReport, ExtractionResult, FixedGroup, FixedOutput, MatchRecord, SectionReport,
};
pub use sample::{sample, EquidistantSequence};
pub use search::{CancellationToken, CrossSearchEngine, ScanBudget, SkipBand};
pub use text::{NormalizationPolicy, NormalizedText, TextNormalizer};
