//! Fixed-skip extraction modes.
//!
//! Both modes sample the whole normalized text once, at offset 0 and the
//! configured skip. Triplet grouping reports the raw sampled characters in
//! clusters of three; dictionary-saltatory mode reports every dictionary
//! term found in the sampled stream. Text shorter than the skip yields
//! [`FixedOutput::TooShort`](crate::results::FixedOutput::TooShort) in
//! either mode.
pub mod groups;
pub mod saltatory;

pub use groups::{extract_triplets, TRIPLET_SIZE};
pub use saltatory::extract_saltatory;

use serde::{Deserialize, Serialize};

/// Which fixed-skip extraction runs on a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedMode {
    /// Clusters of three sampled characters, no dictionary involved
    #[default]
    Triplets,
    /// Dictionary terms found in the sampled stream
    Dictionary,
}
