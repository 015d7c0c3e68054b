use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use super::band::SkipBand;
use super::budget::ScanBudget;
use super::matcher::TermMatcher;
use crate::dictionary::Dictionary;
use crate::errors::{ElsError, ElsResult};
use crate::metrics::{ScanMetrics, TermTally};
use crate::results::MatchRecord;
use crate::sample::{sample, sampled_len};
use crate::text::NormalizedText;

/// Multi-skip, multi-offset dictionary scanner.
///
/// For each term and each skip of the band (ascending), offsets `0..skip`
/// are tried in order. The first offset whose stream contains the term
/// yields one [`MatchRecord`] and ends that skip; scanning then moves on to
/// the next skip, so a term can match once per skip across the band.
/// With `first_match_only` the term is done after its first match.
#[derive(Debug, Clone)]
pub struct CrossSearchEngine {
    band: SkipBand,
    first_match_only: bool,
    metrics: ScanMetrics,
}

/// Matches and work counters produced by one worker for one term
#[derive(Debug, Clone, Default)]
pub struct TermScan {
    pub records: Vec<MatchRecord>,
    pub tally: TermTally,
}

impl CrossSearchEngine {
    pub fn new(band: SkipBand) -> Self {
        Self::with_metrics(band, ScanMetrics::new())
    }

    pub fn with_metrics(band: SkipBand, metrics: ScanMetrics) -> Self {
        Self {
            band,
            first_match_only: false,
            metrics,
        }
    }

    /// Stop scanning a term after its first match
    pub fn first_match_only(mut self, enabled: bool) -> Self {
        self.first_match_only = enabled;
        self
    }

    pub fn band(&self) -> SkipBand {
        self.band
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Scans the band for a single term. Runs on the calling thread.
    pub fn scan_term(
        &self,
        text: &NormalizedText,
        term: &str,
        budget: &ScanBudget,
    ) -> ElsResult<TermScan> {
        let matcher = TermMatcher::new(term);
        let mut scan = TermScan::default();

        for skip in self.band.iter() {
            budget.check()?;

            for offset in 0..skip {
                // Stream length only shrinks as the offset grows
                if !matcher.fits(sampled_len(text.len(), skip, offset)) {
                    break;
                }

                let sequence = sample(text, skip, offset);
                scan.tally.sequences += 1;

                if let Some(positions) = matcher.find_first(&sequence) {
                    trace!(
                        "Cross-search hit '{}' at skip {} offset {}: {:?}",
                        term,
                        skip,
                        offset,
                        positions
                    );
                    scan.records.push(MatchRecord {
                        term: term.to_string(),
                        skip,
                        start_offset: offset,
                        positions: positions.to_vec(),
                    });
                    break;
                }
            }

            if self.first_match_only && !scan.records.is_empty() {
                break;
            }
        }

        scan.tally.matches = scan.records.len() as u64;
        Ok(scan)
    }

    /// Scans every dictionary term, one term per parallel task.
    ///
    /// Runs on the current rayon pool. Records come back grouped by term in
    /// dictionary order, skips ascending within a term.
    pub fn search(
        &self,
        text: &NormalizedText,
        dictionary: &Dictionary,
        budget: &ScanBudget,
    ) -> ElsResult<Vec<MatchRecord>> {
        debug!(
            "Cross-search over {} chars: {} terms, skips {}..={}",
            text.len(),
            dictionary.len(),
            self.band.min(),
            self.band.max()
        );

        let scans: ElsResult<Vec<Vec<MatchRecord>>> = dictionary
            .terms()
            .par_iter()
            .map(|term| {
                let scan = self.scan_term(text, term, budget)?;
                self.metrics.record_term(scan.tally);
                Ok(scan.records)
            })
            .collect();

        let records: Vec<MatchRecord> = match scans {
            Ok(scans) => scans.into_iter().flatten().collect(),
            Err(e) => {
                if matches!(e, ElsError::DeadlineExceeded { .. } | ElsError::Cancelled) {
                    warn!("Cross-search interrupted: {}", e);
                    self.metrics.record_interruption();
                }
                return Err(e);
            }
        };

        info!(
            "Cross-search complete. Found {} matches for {} terms",
            records.len(),
            dictionary.len()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CancellationToken;
    use crate::text::{NormalizationPolicy, TextNormalizer};

    fn normalized(raw: &str) -> NormalizedText {
        TextNormalizer::default().normalize(raw)
    }

    fn dictionary(terms: &[&str]) -> Dictionary {
        Dictionary::new(terms.iter().copied(), 1, NormalizationPolicy::Alphanumeric)
    }

    #[test]
    fn test_one_record_per_term() {
        let text = normalized("dqiqoqqvqqiqqtqqa");
        let engine = CrossSearchEngine::new(SkipBand::new(2, 4).unwrap());
        let records = engine
            .search(&text, &dictionary(&["dio", "vita"]), &ScanBudget::unlimited())
            .unwrap();

        assert_eq!(
            records,
            vec![
                MatchRecord {
                    term: "dio".to_string(),
                    skip: 2,
                    start_offset: 0,
                    positions: vec![0, 2, 4],
                },
                MatchRecord {
                    term: "vita".to_string(),
                    skip: 3,
                    start_offset: 1,
                    positions: vec![7, 10, 13, 16],
                },
            ]
        );
    }

    #[test]
    fn test_one_match_per_skip_across_band() {
        // "luce" hides at skip 3 (offset 1) and at skip 7 (offset 5)
        let text = normalized("zlzzuzzczzezlzzzzzzuzzzzzzczzzzzzezzzzzz");
        let engine = CrossSearchEngine::new(SkipBand::new(2, 10).unwrap());
        let records = engine
            .search(&text, &dictionary(&["luce"]), &ScanBudget::unlimited())
            .unwrap();

        let found: Vec<(usize, usize)> = records.iter().map(|r| (r.skip, r.start_offset)).collect();
        assert_eq!(found, vec![(3, 1), (7, 5)]);
        assert_eq!(records[0].positions, vec![1, 4, 7, 10]);
        assert_eq!(records[1].positions, vec![12, 19, 26, 33]);
    }

    #[test]
    fn test_first_match_only() {
        let text = normalized("zlzzuzzczzezlzzzzzzuzzzzzzczzzzzzezzzzzz");
        let engine = CrossSearchEngine::new(SkipBand::new(2, 10).unwrap()).first_match_only(true);
        let records = engine
            .search(&text, &dictionary(&["luce"]), &ScanBudget::unlimited())
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].skip, 3);
    }

    #[test]
    fn test_first_offset_wins_within_skip() {
        // At skip 2 both offset 0 ("pacepace") and offset 1 ("pace") contain the term
        let text = normalized("ppaacceeppaaccee");
        let engine = CrossSearchEngine::new(SkipBand::new(2, 2).unwrap());
        let records = engine
            .search(&text, &dictionary(&["pace"]), &ScanBudget::unlimited())
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_offset, 0);
        assert_eq!(records[0].positions, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_skip_not_smaller_than_text() {
        let text = normalized("amore");
        let engine = CrossSearchEngine::new(SkipBand::new(5, 9).unwrap());
        let records = engine
            .search(&text, &dictionary(&["amore", "ma"]), &ScanBudget::unlimited())
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let text = normalized("");
        let engine = CrossSearchEngine::new(SkipBand::full());
        let records = engine
            .search(&text, &dictionary(&["vita"]), &ScanBudget::unlimited())
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_positions_spell_the_term() {
        let text = normalized(
            "Nel mezzo del cammin di nostra vita mi ritrovai per una selva oscura, \
             ché la diritta via era smarrita. Ahi quanto a dir qual era è cosa dura",
        );
        let engine = CrossSearchEngine::new(SkipBand::new(1, 12).unwrap());
        let records = engine
            .search(
                &text,
                &dictionary(&["vita", "via", "era", "dura", "mare"]),
                &ScanBudget::unlimited(),
            )
            .unwrap();

        assert!(!records.is_empty());
        for record in &records {
            let spelled: String = record.positions.iter().filter_map(|&p| text.get(p)).collect();
            assert_eq!(spelled, record.term);
            assert!(record
                .positions
                .windows(2)
                .all(|w| w[1] - w[0] == record.skip));
            assert_eq!(record.positions[0] % record.skip, record.start_offset);
        }
    }

    #[test]
    fn test_metrics_published_per_term() {
        let text = normalized("dqiqoqqvqqiqqtqqa");
        let engine = CrossSearchEngine::new(SkipBand::new(2, 4).unwrap());
        engine
            .search(&text, &dictionary(&["dio", "vita"]), &ScanBudget::unlimited())
            .unwrap();

        let stats = engine.metrics().get_stats();
        assert_eq!(stats.terms_scanned, 2);
        assert_eq!(stats.cross_matches, 2);
        assert!(stats.sequences_sampled > 0);
    }

    #[test]
    fn test_cancelled_scan() {
        let text = normalized("dqiqoqqvqqiqqtqqa");
        let engine = CrossSearchEngine::new(SkipBand::full());
        let token = CancellationToken::new();
        token.cancel();
        let budget = ScanBudget::unlimited().with_token(token);

        let result = engine.search(&text, &dictionary(&["dio"]), &budget);
        assert!(matches!(result, Err(ElsError::Cancelled)));
        assert_eq!(engine.metrics().get_stats().interrupted_scans, 1);
    }
}
