use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters describing how much scanning work was done
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    sections_analyzed: Arc<AtomicU64>,
    sections_too_short: Arc<AtomicU64>,

    // Cross-search work
    sequences_sampled: Arc<AtomicU64>,
    terms_scanned: Arc<AtomicU64>,
    interrupted_scans: Arc<AtomicU64>,

    // Findings
    fixed_outputs: Arc<AtomicU64>,
    cross_matches: Arc<AtomicU64>,
}

/// Work done by one worker while scanning one term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermTally {
    pub sequences: u64,
    pub matches: u64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self {
            sections_analyzed: Arc::new(AtomicU64::new(0)),
            sections_too_short: Arc::new(AtomicU64::new(0)),
            sequences_sampled: Arc::new(AtomicU64::new(0)),
            terms_scanned: Arc::new(AtomicU64::new(0)),
            interrupted_scans: Arc::new(AtomicU64::new(0)),
            fixed_outputs: Arc::new(AtomicU64::new(0)),
            cross_matches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a finished section and the size of its fixed-mode output
    pub fn record_section(&self, fixed_outputs: usize, too_short: bool) {
        self.sections_analyzed.fetch_add(1, Ordering::Relaxed);
        self.fixed_outputs
            .fetch_add(fixed_outputs as u64, Ordering::Relaxed);
        if too_short {
            self.sections_too_short.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Publishes the local tally of one term scan
    pub fn record_term(&self, tally: TermTally) {
        self.terms_scanned.fetch_add(1, Ordering::Relaxed);
        self.sequences_sampled
            .fetch_add(tally.sequences, Ordering::Relaxed);
        self.cross_matches.fetch_add(tally.matches, Ordering::Relaxed);
        debug!(
            "Term scanned: {} sequences, {} matches",
            tally.sequences, tally.matches
        );
    }

    /// Records a cross-search stopped by its deadline or a cancel
    pub fn record_interruption(&self) {
        self.interrupted_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            sections_analyzed: self.sections_analyzed.load(Ordering::Relaxed),
            sections_too_short: self.sections_too_short.load(Ordering::Relaxed),
            sequences_sampled: self.sequences_sampled.load(Ordering::Relaxed),
            terms_scanned: self.terms_scanned.load(Ordering::Relaxed),
            interrupted_scans: self.interrupted_scans.load(Ordering::Relaxed),
            fixed_outputs: self.fixed_outputs.load(Ordering::Relaxed),
            cross_matches: self.cross_matches.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Scan stats:\n\
             Sections analyzed (too short): {} ({})\n\
             Terms scanned: {}\n\
             Sequences sampled: {}\n\
             Fixed-mode outputs: {}\n\
             Cross-search matches: {}\n\
             Interrupted scans: {}",
            stats.sections_analyzed,
            stats.sections_too_short,
            stats.terms_scanned,
            stats.sequences_sampled,
            stats.fixed_outputs,
            stats.cross_matches,
            stats.interrupted_scans
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub sections_analyzed: u64,
    pub sections_too_short: u64,
    pub sequences_sampled: u64,
    pub terms_scanned: u64,
    pub interrupted_scans: u64,
    pub fixed_outputs: u64,
    pub cross_matches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_tracking() {
        let metrics = ScanMetrics::new();
        metrics.record_section(4, false);
        metrics.record_section(0, true);

        let stats = metrics.get_stats();
        assert_eq!(stats.sections_analyzed, 2);
        assert_eq!(stats.sections_too_short, 1);
        assert_eq!(stats.fixed_outputs, 4);
    }

    #[test]
    fn test_term_tallies_accumulate() {
        let metrics = ScanMetrics::new();
        metrics.record_term(TermTally {
            sequences: 10,
            matches: 1,
        });
        metrics.record_term(TermTally {
            sequences: 5,
            matches: 2,
        });

        let stats = metrics.get_stats();
        assert_eq!(stats.terms_scanned, 2);
        assert_eq!(stats.sequences_sampled, 15);
        assert_eq!(stats.cross_matches, 3);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = ScanMetrics::new();
        let worker = metrics.clone();
        worker.record_interruption();
        assert_eq!(metrics.get_stats().interrupted_scans, 1);
    }
}
