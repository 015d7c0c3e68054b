use tracing::{debug, trace, warn};

use crate::dictionary::Dictionary;
use crate::highlight::order_by_first_occurrence;
use crate::results::{FixedOutput, MatchRecord};
use crate::sample::sample;
use crate::search::TermMatcher;
use crate::text::NormalizedText;

/// Samples `text` once at `skip` from offset 0 and reports every
/// non-overlapping occurrence of every dictionary term in that stream,
/// ordered by first position in the normalized text.
pub fn extract_saltatory(text: &NormalizedText, skip: usize, dictionary: &Dictionary) -> FixedOutput {
    if text.len() < skip {
        warn!(
            "Text too short for saltatory extraction: {} chars, skip {}",
            text.len(),
            skip
        );
        return FixedOutput::TooShort {
            text_len: text.len(),
            skip,
        };
    }

    let sequence = sample(text, skip, 0);
    let mut hits = Vec::new();

    for term in dictionary.iter() {
        let matcher = TermMatcher::new(term);
        for positions in matcher.find_all(&sequence) {
            trace!("Saltatory hit '{}' at {:?}", term, positions);
            hits.push(MatchRecord {
                term: term.to_string(),
                skip,
                start_offset: 0,
                positions: positions.to_vec(),
            });
        }
    }

    order_by_first_occurrence(&mut hits);

    debug!(
        "Saltatory extraction at skip {}: {} hits in {} sampled chars",
        skip,
        hits.len(),
        sequence.len()
    );

    FixedOutput::Hits { hits }
}
