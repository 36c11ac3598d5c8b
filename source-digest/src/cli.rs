/// # source-digest CLI Interface (Module)
///
/// Command parsing and the `run` entrypoint. All pipeline logic lives in
/// `source-digest-core`; this module turns arguments and the optional config
/// file into a [`CollectConfig`](source_digest_core::config::CollectConfig),
/// runs it and prints the summary.
///
/// `run` is separate from `main` so integration tests can invoke it with a
/// constructed [`Cli`].
use crate::load_config::{build_config, load_config, FileConfig, Overrides};
use crate::viewer::SystemViewer;
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use source_digest_core::collect::{CollectReport, Collector};
use source_digest_core::config::TieBreak;
use source_digest_core::observer::TracingObserver;
use source_digest_core::strategy::StrategyRegistry;
use std::path::PathBuf;

/// CLI for source-digest: collect source trees into one compact text file.
#[derive(Parser)]
#[clap(
    name = "source-digest",
    version,
    about = "Concatenate source files from directory trees into one comment-free text file"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect matching files from all roots into the output file
    Collect(CollectArgs),
    /// List the supported file-type tags
    Languages,
}

#[derive(Args, Debug, Default)]
pub struct CollectArgs {
    /// Path to the YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Directory to scan; repeatable, added to the config file's roots
    #[clap(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Path prefix to ignore; repeatable, added to the config file's list
    #[clap(long = "ignore", value_name = "DIR")]
    pub ignore: Vec<PathBuf>,

    /// Output file, replacing the config file's value
    #[clap(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Open the output file with the system viewer when done
    #[clap(long)]
    pub open: bool,

    /// Ordering among files of equal size
    #[clap(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Print the run report as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TieBreakArg {
    Discovery,
    Path,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Discovery => TieBreak::Discovery,
            TieBreakArg::Path => TieBreak::Path,
        }
    }
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Collect(args) => collect(args),
        Commands::Languages => {
            for tag in StrategyRegistry::new().supported_tags() {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

fn collect(args: CollectArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        roots: args.roots,
        ignore: args.ignore,
        output: args.output,
        open_output: args.open,
        tie_break: args.tie_break.map(Into::into),
    };
    let config = build_config(file, overrides)?;

    tracing::info!(command = "collect", "Starting collection");
    let viewer = SystemViewer::new();
    let report = Collector::new(&config)
        .with_observer(&TracingObserver)
        .with_viewer(&viewer)
        .run()
        .map_err(|e| {
            tracing::error!(command = "collect", error = %e, "Collection failed");
            anyhow::Error::new(e)
        })?;
    tracing::info!(command = "collect", appended = report.appended(), "Collection complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &CollectReport) {
    for profile in &report.profiles {
        println!(
            "{}: {:?} ({} discovered, {} appended, {} skipped)",
            profile.name, profile.status, profile.discovered, profile.appended, profile.skipped
        );
    }
    println!(
        "Collected {} files into {}",
        report.appended(),
        report.output_path.display()
    );
}
