mod sections;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use elscan::{
    sample, Analyzer, BandMode, CliOverrides, Dictionary, DocumentReport, ElsConfig, ElsError,
    FixedMode, FixedOutput, SectionReport, TextNormalizer,
};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use serde::Serialize;
use std::{fs, num::NonZeroUsize, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::sections::split_sections;

type Result<T> = std::result::Result<T, ElsError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Triplets,
    Dictionary,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BandArg {
    Full,
    FromSkip,
    Custom,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// UTF-8 text file to analyze
    input: PathBuf,

    /// File with one dictionary term per line ('#' starts a comment)
    #[arg(short = 'd', long)]
    dictionary: Option<PathBuf>,

    /// Configuration file (YAML) layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip used by the fixed mode
    #[arg(short, long)]
    skip: Option<usize>,

    /// Fixed-mode extractor
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// How the cross-search skip band is chosen
    #[arg(long, value_enum)]
    band: Option<BandArg>,

    /// Lower bound of a custom band
    #[arg(long)]
    band_min: Option<usize>,

    /// Upper bound of a custom band
    #[arg(long)]
    band_max: Option<usize>,

    /// Number of consecutive skips starting at --skip when --band from-skip
    #[arg(long)]
    band_width: Option<usize>,

    /// Shortest dictionary term kept, in characters
    #[arg(long)]
    min_term_length: Option<usize>,

    /// Keep punctuation and symbols during normalization
    #[arg(long)]
    keep_punctuation: bool,

    /// Stop at the first skip where a term matches
    #[arg(long)]
    first_match_only: bool,

    /// Analyze all sections joined into one text
    #[arg(short, long)]
    unify: bool,

    /// Abort the cross-search after this long (e.g. 30s, 2m)
    #[arg(long)]
    timeout: Option<String>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Log filter used when RUST_LOG is unset (error|warn|info|debug|trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Show a progress bar while sections are analyzed
    #[arg(long)]
    progress: bool,
}

#[derive(Parser)]
struct SampleArgs {
    /// UTF-8 text file to sample
    input: PathBuf,

    /// Distance between sampled characters
    #[arg(short, long)]
    skip: usize,

    /// Position of the first sampled character, in [0, skip)
    #[arg(short, long, default_value = "0")]
    offset: usize,

    /// Keep punctuation and symbols during normalization
    #[arg(long)]
    keep_punctuation: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract equidistant letter sequences from a text file
    Analyze(Box<AnalyzeArgs>),

    /// Print the equidistant sequence for one skip and offset
    Sample(SampleArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => analyze(*args),
        Commands::Sample(args) => sample_file(args),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cli_overrides(args: &AnalyzeArgs) -> CliOverrides {
    CliOverrides {
        skip: args.skip,
        mode: args.mode.map(|mode| match mode {
            ModeArg::Triplets => FixedMode::Triplets,
            ModeArg::Dictionary => FixedMode::Dictionary,
        }),
        band: args.band.map(|band| match band {
            BandArg::Full => BandMode::Full,
            BandArg::FromSkip => BandMode::FromSkip,
            BandArg::Custom => BandMode::Custom,
        }),
        band_width: args.band_width,
        band_min: args.band_min,
        band_max: args.band_max,
        dictionary: Vec::new(),
        min_term_length: args.min_term_length,
        keep_punctuation: args.keep_punctuation,
        first_match_only: args.first_match_only,
        unify_sections: args.unify,
        thread_count: args.threads,
        timeout: args.timeout.clone(),
        log_level: args.log_level.clone(),
    }
}

fn load_dictionary(args: &AnalyzeArgs, config: &ElsConfig) -> Result<Dictionary> {
    let policy = config.normalization();
    if let Some(path) = &args.dictionary {
        let content = fs::read_to_string(path)?;
        let terms = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));
        debug!("Loading dictionary from {}", path.display());
        return Ok(Dictionary::new(terms, config.min_term_length, policy));
    }

    if config.dictionary.is_empty() {
        debug!("Using the classic dictionary");
        Ok(Dictionary::classic(config.min_term_length, policy))
    } else {
        Ok(Dictionary::new(
            &config.dictionary,
            config.min_term_length,
            policy,
        ))
    }
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config =
        ElsConfig::load_from(args.config.as_deref())?.merge_with_cli(cli_overrides(&args));
    init_logging(&config.log_level);

    let content = fs::read_to_string(&args.input)?;
    let document = split_sections(&content);
    if document.is_empty() {
        return Err(ElsError::config_error(format!(
            "no text found in {}",
            args.input.display()
        )));
    }
    info!(
        "Read {} sections from {}",
        document.sections.len(),
        args.input.display()
    );

    let dictionary = load_dictionary(&args, &config)?;
    let section_count = if config.unify_sections {
        1
    } else {
        document.sections.len()
    };
    let analyzer = Analyzer::new(config, dictionary)?;

    let progress = if args.progress {
        let bar = ProgressBar::new(section_count as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} sections {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let report = analyzer.analyze_document_with(&document, |section| {
        progress.set_message(section.title.clone());
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    match args.format {
        OutputFormat::Text => print_report(&report, analyzer.config()),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
        OutputFormat::Yaml => print!("{}", to_yaml(&report)?),
    }
    Ok(())
}

fn sample_file(args: SampleArgs) -> Result<()> {
    if args.skip == 0 {
        return Err(ElsError::config_error("skip must be at least 1"));
    }
    if args.offset >= args.skip {
        return Err(ElsError::config_error(format!(
            "offset {} must be below skip {}",
            args.offset, args.skip
        )));
    }

    let content = fs::read_to_string(&args.input)?;
    let normalizer = TextNormalizer::new(elscan::NormalizationPolicy::from_strip_punctuation(
        !args.keep_punctuation,
    ));
    let text = normalizer.normalize(&content);
    let sequence = sample(&text, args.skip, args.offset);

    match args.format {
        OutputFormat::Text => {
            println!("{}", sequence.as_str());
            println!(
                "{} characters from {} (skip {}, offset {})",
                sequence.len(),
                text.len(),
                sequence.skip(),
                sequence.start_offset()
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sequence)?),
        OutputFormat::Yaml => print!("{}", to_yaml(&sequence)?),
    }
    Ok(())
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| ElsError::serialization(e.to_string()))
}

fn format_positions(positions: &[usize]) -> String {
    positions.iter().join(", ")
}

fn print_section(section: &SectionReport, config: &ElsConfig) {
    let result = &section.result;
    println!(
        "\n{} {}",
        section.title.blue().bold(),
        format!("({} chars)", result.normalized_len).dimmed()
    );

    match &result.fixed {
        FixedOutput::TooShort { text_len, skip } => {
            println!(
                "  {}",
                format!("Text too short for skip {} ({} chars)", skip, text_len).yellow()
            );
        }
        FixedOutput::Groups { groups } => {
            println!(
                "  {} {}",
                format!("Triplets at skip {}:", config.skip).green(),
                groups.iter().map(|g| g.cluster.as_str()).join(" ")
            );
        }
        FixedOutput::Hits { hits } => {
            println!(
                "  {}",
                format!("Dictionary hits at skip {}:", config.skip).green()
            );
            for hit in hits {
                println!("    {} at {}", hit.term, format_positions(&hit.positions));
            }
        }
    }

    if result.cross_search_matches.is_empty() {
        println!("  {}", "No cross-search matches".dimmed());
        return;
    }
    println!("  {}", "Cross-search:".green());
    for m in &result.cross_search_matches {
        println!(
            "    {} (skip {}, offset {}) at {}",
            m.term.bold(),
            m.skip,
            m.start_offset,
            format_positions(&m.positions)
        );
    }
}

fn print_report(report: &DocumentReport, config: &ElsConfig) {
    for section in &report.sections {
        print_section(section, config);
    }

    println!(
        "\nFound {} fixed-mode outputs and {} cross-search matches in {} sections",
        report.total_fixed,
        report.total_cross_matches,
        report.sections.len()
    );
    if report.sections_too_short > 0 {
        println!(
            "{}",
            format!(
                "{} sections were too short for skip {}",
                report.sections_too_short, config.skip
            )
            .yellow()
        );
    }
}
