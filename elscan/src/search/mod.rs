//! Multi-skip dictionary cross-search.
//!
//! The scan is `terms x skips x offsets` sampled streams, which dominates
//! runtime. Work is split per term across a rayon pool: every worker reads
//! the same immutable text and dictionary and owns its output buffer, and
//! the per-term lists are concatenated in dictionary order afterwards.
//!
//! ```rust,ignore
//! let engine = CrossSearchEngine::new(SkipBand::full());
//! let records = engine.search(&text, &dictionary, &ScanBudget::unlimited())?;
//! ```
//!
//! A [`ScanBudget`] is checked before each (term, skip) unit so a deadline
//! or a [`CancellationToken`] can bound the worst case.
pub mod band;
pub mod budget;
pub mod engine;
pub mod matcher;

pub use band::SkipBand;
pub use budget::{CancellationToken, ScanBudget};
pub use engine::CrossSearchEngine;
pub use matcher::TermMatcher;
