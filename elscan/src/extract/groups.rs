use tracing::{debug, warn};

use crate::results::{FixedGroup, FixedOutput};
use crate::sample::sample;
use crate::text::NormalizedText;

/// Characters per cluster in triplet grouping
pub const TRIPLET_SIZE: usize = 3;

/// Samples `text` at `skip` from offset 0 and cuts the stream into
/// consecutive triplets, dropping a trailing partial cluster.
pub fn extract_triplets(text: &NormalizedText, skip: usize) -> FixedOutput {
    if text.len() < skip {
        warn!(
            "Text too short for triplet grouping: {} chars, skip {}",
            text.len(),
            skip
        );
        return FixedOutput::TooShort {
            text_len: text.len(),
            skip,
        };
    }

    let sequence = sample(text, skip, 0);
    let sampled: Vec<char> = sequence.as_str().chars().collect();

    let groups: Vec<FixedGroup> = sampled
        .chunks_exact(TRIPLET_SIZE)
        .zip(sequence.source_indices().chunks_exact(TRIPLET_SIZE))
        .map(|(cluster, indices)| FixedGroup {
            cluster: cluster.iter().collect(),
            source_indices: indices.to_vec(),
        })
        .collect();

    debug!(
        "Triplet grouping at skip {}: {} sampled chars, {} groups",
        skip,
        sequence.len(),
        groups.len()
    );

    FixedOutput::Groups { groups }
}
