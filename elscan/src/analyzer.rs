//! Per-section pipeline.
//!
//! ```text
//! raw text -> normalize -> fixed mode (triplets | dictionary) ---\
//!                       -> cross-search over the skip band ------+-> order -> highlights
//! ```
//!
//! An [`Analyzer`] is built once from a validated [`ElsConfig`] and a
//! [`Dictionary`] and then reused for every section; it holds no mutable
//! state besides its metrics counters.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ElsConfig;
use crate::dictionary::Dictionary;
use crate::errors::{ElsError, ElsResult};
use crate::extract::{extract_saltatory, extract_triplets, FixedMode};
use crate::highlight::{aggregate_highlights, order_by_first_occurrence};
use crate::metrics::ScanMetrics;
use crate::results::{DocumentReport, ExtractionResult, FixedOutput, SectionReport};
use crate::search::{CancellationToken, CrossSearchEngine, ScanBudget};
use crate::text::TextNormalizer;

/// Title given to the single section produced by [`Document::unified`]
pub const UNIFIED_TITLE: &str = "Full text";

/// A titled block of raw document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub text: String,
}

impl Section {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Sections in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All section texts joined by a space into one section; titles are dropped
    pub fn unified(&self) -> Self {
        let text = self
            .sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            sections: vec![Section::new(UNIFIED_TITLE, text)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Runs both extraction modes over sections of text
#[derive(Debug)]
pub struct Analyzer {
    config: ElsConfig,
    dictionary: Dictionary,
    normalizer: TextNormalizer,
    engine: CrossSearchEngine,
    timeout: Option<Duration>,
    token: CancellationToken,
    pool: rayon::ThreadPool,
    metrics: ScanMetrics,
}

impl Analyzer {
    /// Validates the configuration and sets up the worker pool.
    ///
    /// Fails with [`ElsError::ConfigError`] on an invalid option or an
    /// empty dictionary.
    pub fn new(config: ElsConfig, dictionary: Dictionary) -> ElsResult<Self> {
        config.validate()?;
        if dictionary.is_empty() {
            return Err(ElsError::config_error(
                "dictionary is empty after normalization and length filtering",
            ));
        }

        let band = config.resolve_band()?;
        let timeout = config.timeout_duration()?;
        let metrics = ScanMetrics::new();
        let engine = CrossSearchEngine::with_metrics(band, metrics.clone())
            .first_match_only(config.first_match_only);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count.get())
            .thread_name(|i| format!("elscan-worker-{}", i))
            .build()
            .map_err(|e| ElsError::thread_pool(e.to_string()))?;

        info!(
            "Analyzer ready: mode {:?}, skip {}, band {}..={}, {} terms, {} threads",
            config.mode,
            config.skip,
            band.min(),
            band.max(),
            dictionary.len(),
            config.thread_count
        );

        Ok(Self {
            normalizer: TextNormalizer::new(config.normalization()),
            config,
            dictionary,
            engine,
            timeout,
            token: CancellationToken::new(),
            pool,
            metrics,
        })
    }

    /// Builds an analyzer from the terms listed in the configuration
    pub fn from_config(config: ElsConfig) -> ElsResult<Self> {
        let dictionary = Dictionary::new(
            &config.dictionary,
            config.min_term_length,
            config.normalization(),
        );
        Self::new(config, dictionary)
    }

    pub fn config(&self) -> &ElsConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Token that cancels running and future cross-searches of this analyzer
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Analyzes the raw text of one section
    pub fn analyze_section(&self, raw: &str) -> ElsResult<ExtractionResult> {
        let text = self.normalizer.normalize(raw);
        debug!("Normalized section to {} chars", text.len());

        let mut fixed = match self.config.mode {
            FixedMode::Triplets => extract_triplets(&text, self.config.skip),
            FixedMode::Dictionary => extract_saltatory(&text, self.config.skip, &self.dictionary),
        };
        match &mut fixed {
            FixedOutput::Groups { groups } => order_by_first_occurrence(groups),
            FixedOutput::Hits { hits } => order_by_first_occurrence(hits),
            FixedOutput::TooShort { .. } => {}
        }

        let budget = ScanBudget::with_limit(self.timeout).with_token(self.token.clone());
        let mut cross_search_matches = self
            .pool
            .install(|| self.engine.search(&text, &self.dictionary, &budget))?;
        order_by_first_occurrence(&mut cross_search_matches);

        let highlights = aggregate_highlights(&fixed, &cross_search_matches);
        self.metrics.record_section(fixed.len(), fixed.is_too_short());

        Ok(ExtractionResult {
            normalized_len: text.len(),
            fixed,
            cross_search_matches,
            highlights,
        })
    }

    /// Analyzes every section in order, or the unified text when
    /// `unify_sections` is set
    pub fn analyze_document(&self, document: &Document) -> ElsResult<DocumentReport> {
        self.analyze_document_with(document, |_| {})
    }

    /// Like [`analyze_document`](Self::analyze_document), calling
    /// `on_section` after each section report is added
    pub fn analyze_document_with<F>(
        &self,
        document: &Document,
        mut on_section: F,
    ) -> ElsResult<DocumentReport>
    where
        F: FnMut(&SectionReport),
    {
        let unified;
        let document = if self.config.unify_sections {
            unified = document.unified();
            &unified
        } else {
            document
        };

        info!("Analyzing {} sections", document.sections.len());

        let mut report = DocumentReport::new();
        for section in &document.sections {
            debug!("Analyzing section '{}'", section.title);
            let section_report = SectionReport {
                title: section.title.clone(),
                result: self.analyze_section(&section.text)?,
            };
            on_section(&section_report);
            report.add_section(section_report);
        }

        self.metrics.log_stats();
        info!(
            "Analysis complete. {} fixed-mode outputs and {} cross-search matches in {} sections",
            report.total_fixed,
            report.total_cross_matches,
            report.sections.len()
        );

        Ok(report)
    }
}
