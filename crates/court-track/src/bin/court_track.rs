//! court-track CLI: post-process cached detector runs.

use clap::{Args, Parser, Subcommand, ValueEnum};
use court_track::{CourtTrackConfig, DetectionCache, Pipeline, TrackingReport};
use log::LevelFilter;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "court-track")]
#[command(about = "Fill ball gaps, detect hits and bounces, and map players onto a mini-court")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on a detection cache and write a JSON report.
    Run(RunArgs),

    /// Print (or write) the default configuration.
    DefaultConfig {
        /// Write the configuration here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the detected ball event frames, one per line.
    Events(EventsArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Detection cache (JSON).
    #[arg(long)]
    cache: PathBuf,

    /// Configuration (JSON); missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path. Defaults to `<run_id>_report.json`.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevelArg::Info)]
    log_level: LogLevelArg,
}

#[derive(Debug, Clone, Args)]
struct EventsArgs {
    /// Detection cache (JSON).
    #[arg(long)]
    cache: PathBuf,

    /// Configuration (JSON); missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    fn to_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::DefaultConfig { output } => run_default_config(output.as_deref()),
        Commands::Events(args) => run_events(&args),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) -> CliResult<()> {
    court_track::core::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) -> CliResult<()> {
    use tracing_log::AsTrace;

    court_track::core::init_tracing(level.as_trace(), false).map_err(|e| -> CliError { e })?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> CliResult<CourtTrackConfig> {
    let config = match path {
        Some(p) => CourtTrackConfig::load_json(p)?,
        None => CourtTrackConfig::default(),
    };
    Ok(config)
}

// ── run ───────────────────────────────────────────────────────────────

fn run(args: &RunArgs) -> CliResult<()> {
    init_logging(args.log_level.to_filter())?;

    let pipeline = Pipeline::new(load_config(args.config.as_deref())?)?;
    let cache = DetectionCache::load_json(&args.cache)?;
    let report = pipeline.run(&cache)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| TrackingReport::default_path(&report.run_id));
    report.write_json(&output)?;

    println!(
        "{}: {} frames, {} ball events -> {}",
        report.run_id,
        report.frame_count,
        report.events.len(),
        output.display()
    );
    Ok(())
}

// ── default-config ────────────────────────────────────────────────────

fn run_default_config(output: Option<&Path>) -> CliResult<()> {
    let config = CourtTrackConfig::default();
    match output {
        Some(path) => config.write_json(path)?,
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

// ── events ────────────────────────────────────────────────────────────

fn run_events(args: &EventsArgs) -> CliResult<()> {
    init_logging(LevelFilter::Warn)?;

    let pipeline = Pipeline::new(load_config(args.config.as_deref())?)?;
    let cache = DetectionCache::load_json(&args.cache)?;
    for frame in pipeline.events(&cache) {
        println!("{frame}");
    }
    Ok(())
}
