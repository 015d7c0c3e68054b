use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{ElsError, ElsResult};
use crate::extract::FixedMode;
use crate::search::SkipBand;
use crate::text::NormalizationPolicy;

/// Configuration for an analysis run.
///
/// # Configuration Locations
///
/// Values are layered from, in order of precedence:
/// 1. Custom config file specified via `--config`
/// 2. Local `.elscan.yaml` in the current directory
/// 3. Global `$HOME/.config/elscan/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Interval for fixed-mode sampling (and the start of a from_skip band)
/// skip: 50
///
/// # Fixed-mode extraction: triplets or dictionary
/// mode: dictionary
///
/// # Cross-search band: full (2..=49), from_skip (skip..skip+band_width-1) or custom
/// band: from_skip
/// band_width: 3
///
/// # Inline terms; the CLI can also read them from a word list
/// dictionary: ["vita", "luce", "amore"]
/// min_term_length: 4
///
/// # Abort the cross-search after this long (humantime syntax)
/// timeout: "30s"
///
/// thread_count: 4
/// log_level: "info"
/// ```
///
/// Command-line arguments take precedence over file values; see
/// [`merge_with_cli`](ElsConfig::merge_with_cli).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElsConfig {
    /// Interval between sampled characters in fixed mode
    #[serde(default = "default_skip")]
    pub skip: usize,

    /// Which fixed-skip extraction runs on each section
    #[serde(default)]
    pub mode: FixedMode,

    /// How the cross-search skip band is derived
    #[serde(default)]
    pub band: BandMode,

    /// Number of skips in a `from_skip` band
    #[serde(default = "default_band_width")]
    pub band_width: usize,

    /// Lower bound of a `custom` band
    #[serde(default)]
    pub band_min: Option<usize>,

    /// Upper bound of a `custom` band
    #[serde(default)]
    pub band_max: Option<usize>,

    /// Inline dictionary terms
    #[serde(default)]
    pub dictionary: Vec<String>,

    /// Terms shorter than this many characters are ignored
    #[serde(default = "default_min_term_length")]
    pub min_term_length: usize,

    /// Drop punctuation and symbols during normalization
    #[serde(default = "default_strip_punctuation")]
    pub strip_punctuation: bool,

    /// Stop scanning a term after its first cross-search match
    #[serde(default)]
    pub first_match_only: bool,

    /// Analyze all sections joined as one text
    #[serde(default)]
    pub unify_sections: bool,

    /// Number of cross-search worker threads
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Cross-search deadline per section, e.g. "500ms" or "2m"
    #[serde(default)]
    pub timeout: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Source of the cross-search skip band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandMode {
    /// Skips 2 through 49
    #[default]
    Full,
    /// `band_width` consecutive skips starting at `skip`
    FromSkip,
    /// `band_min` through `band_max`
    Custom,
}

pub const DEFAULT_SKIP: usize = 50;
pub const DEFAULT_BAND_WIDTH: usize = 3;
pub const DEFAULT_MIN_TERM_LENGTH: usize = 4;

fn default_skip() -> usize {
    DEFAULT_SKIP
}

fn default_band_width() -> usize {
    DEFAULT_BAND_WIDTH
}

fn default_min_term_length() -> usize {
    DEFAULT_MIN_TERM_LENGTH
}

fn default_strip_punctuation() -> bool {
    true
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Options given on the command line; `None` and `false` mean "not given"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub skip: Option<usize>,
    pub mode: Option<FixedMode>,
    pub band: Option<BandMode>,
    pub band_width: Option<usize>,
    pub band_min: Option<usize>,
    pub band_max: Option<usize>,
    pub dictionary: Vec<String>,
    pub min_term_length: Option<usize>,
    pub keep_punctuation: bool,
    pub first_match_only: bool,
    pub unify_sections: bool,
    pub thread_count: Option<NonZeroUsize>,
    pub timeout: Option<String>,
    pub log_level: Option<String>,
}

impl Default for ElsConfig {
    fn default() -> Self {
        Self {
            skip: default_skip(),
            mode: FixedMode::default(),
            band: BandMode::default(),
            band_width: default_band_width(),
            band_min: None,
            band_max: None,
            dictionary: Vec::new(),
            min_term_length: default_min_term_length(),
            strip_punctuation: default_strip_punctuation(),
            first_match_only: false,
            unify_sections: false,
            thread_count: default_thread_count(),
            timeout: None,
            log_level: default_log_level(),
        }
    }
}

impl ElsConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("elscan/config.yaml")),
            Some(PathBuf::from(".elscan.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicit file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Applies command-line overrides on top of the loaded values.
    ///
    /// Every option the user passed wins, even when it equals the default.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(skip) = cli.skip {
            self.skip = skip;
        }
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(band) = cli.band {
            self.band = band;
        }
        if let Some(band_width) = cli.band_width {
            self.band_width = band_width;
        }
        if cli.band_min.is_some() {
            self.band_min = cli.band_min;
        }
        if cli.band_max.is_some() {
            self.band_max = cli.band_max;
        }
        if !cli.dictionary.is_empty() {
            self.dictionary = cli.dictionary;
        }
        if let Some(min_term_length) = cli.min_term_length {
            self.min_term_length = min_term_length;
        }
        if cli.keep_punctuation {
            self.strip_punctuation = false;
        }
        if cli.first_match_only {
            self.first_match_only = true;
        }
        if cli.unify_sections {
            self.unify_sections = true;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if cli.timeout.is_some() {
            self.timeout = cli.timeout;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }

    /// Checks every option before any scanning begins
    pub fn validate(&self) -> ElsResult<()> {
        if self.skip == 0 {
            return Err(ElsError::config_error("skip must be greater than 0"));
        }
        self.resolve_band()?;
        self.timeout_duration()?;
        Ok(())
    }

    /// The inclusive skip band the cross-search scans
    pub fn resolve_band(&self) -> ElsResult<SkipBand> {
        match self.band {
            BandMode::Full => Ok(SkipBand::full()),
            BandMode::FromSkip => SkipBand::from_skip(self.skip, self.band_width),
            BandMode::Custom => match (self.band_min, self.band_max) {
                (Some(min), Some(max)) => SkipBand::new(min, max),
                _ => Err(ElsError::config_error(
                    "custom band requires both band_min and band_max",
                )),
            },
        }
    }

    /// Parsed cross-search deadline
    pub fn timeout_duration(&self) -> ElsResult<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| {
                humantime::parse_duration(raw).map_err(|e| {
                    ElsError::config_error(format!("invalid timeout '{}': {}", raw, e))
                })
            })
            .transpose()
    }

    pub fn normalization(&self) -> NormalizationPolicy {
        NormalizationPolicy::from_strip_punctuation(self.strip_punctuation)
    }
}
