//! Verdict CLI: analyze symbols and inspect strategy profiles.
//!
//! Commands:
//! - `analyze`: Run a profile over CSV data or synthetic series, print the
//!   latest consensus per symbol, optionally export per-bar reports
//! - `profiles`: List the available profiles or dump them as TOML

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use verdict_core::domain::TimeSeries;
use verdict_core::profile::ProfileBook;
use verdict_runner::{analyze_universe, latest_summary, load_dir, save_reports, synthetic_universe};

#[derive(Parser)]
#[command(
    name = "verdict",
    about = "Verdict CLI: technical indicator signals and consensus voting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze symbols under one strategy profile.
    Analyze {
        /// Symbols to analyze. With --data-dir and no symbols, every CSV file is used.
        symbols: Vec<String>,

        /// Profile name (corto_plazo, mediano_plazo, largo_plazo, agresivo, conservador).
        #[arg(long, default_value = "mediano_plazo")]
        profile: String,

        /// TOML profile file. Defaults to the built-in profiles.
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Directory of `<SYMBOL>.csv` files (datetime,open,high,low,close,volume).
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Use deterministic synthetic series instead of files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Bars per synthetic series.
        #[arg(long, default_value_t = 252)]
        bars: usize,

        /// Write per-bar CSV/JSON reports and a summary here.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Analyze symbols one at a time instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// List strategy profiles.
    Profiles {
        /// TOML profile file. Defaults to the built-in profiles.
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Print the profiles as TOML instead of a listing.
        #[arg(long, default_value_t = false)]
        toml: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            profile,
            profiles,
            data_dir,
            synthetic,
            bars,
            output_dir,
            sequential,
        } => run_analyze(AnalyzeArgs {
            symbols,
            profile,
            profiles,
            data_dir,
            synthetic,
            bars,
            output_dir,
            parallel: !sequential,
        }),
        Commands::Profiles { profiles, toml } => run_profiles(profiles.as_deref(), toml),
    }
}

struct AnalyzeArgs {
    symbols: Vec<String>,
    profile: String,
    profiles: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    synthetic: bool,
    bars: usize,
    output_dir: Option<PathBuf>,
    parallel: bool,
}

fn load_book(path: Option<&Path>) -> Result<ProfileBook> {
    match path {
        Some(p) => {
            ProfileBook::load(p).with_context(|| format!("failed to load profiles from {}", p.display()))
        }
        None => Ok(ProfileBook::builtin()),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let book = load_book(args.profiles.as_deref())?;
    let profile = book.get(&args.profile)?;

    let series: Vec<TimeSeries> = match (&args.data_dir, args.synthetic) {
        (Some(_), true) => bail!("--data-dir and --synthetic are mutually exclusive"),
        (None, false) => bail!("one of --data-dir or --synthetic is required"),
        (None, true) => {
            if args.symbols.is_empty() {
                bail!("--synthetic needs at least one symbol");
            }
            synthetic_universe(args.symbols.as_slice(), args.bars)?
        }
        (Some(dir), false) => {
            let wanted = (!args.symbols.is_empty()).then_some(args.symbols.as_slice());
            let loaded = load_dir(dir, wanted)?;
            for (symbol, reason) in &loaded.failures {
                warn!(symbol = %symbol, reason = %reason, "skipped");
            }
            loaded.series
        }
    };

    if series.is_empty() {
        bail!("no symbols to analyze");
    }
    info!(profile = %profile.name, symbols = series.len(), "starting analysis");

    let universe = analyze_universe(&series, &profile, args.parallel)?;

    println!(
        "{:<10} {:<20} {:>12} {:<14} {:>9}",
        "SYMBOL", "TIMESTAMP", "CLOSE", "VERDICT", "STRENGTH"
    );
    for row in latest_summary(&universe) {
        println!(
            "{:<10} {:<20} {:>12.4} {:<14} {:>+9.3}",
            row.symbol,
            row.timestamp.format("%Y-%m-%d %H:%M"),
            row.close,
            row.verdict,
            row.strength
        );
    }

    if let Some(dir) = args.output_dir {
        let written = save_reports(&universe, &dir)?;
        println!("{} files saved to: {}", written.len(), dir.display());
    }

    Ok(())
}

fn run_profiles(path: Option<&Path>, as_toml: bool) -> Result<()> {
    let book = load_book(path)?;

    if as_toml {
        print!("{}", book.to_toml().context("failed to serialize profiles")?);
        return Ok(());
    }

    for name in book.names() {
        let profile = book.get(name)?;
        let indicators: Vec<String> = profile.indicators.iter().map(|k| k.to_string()).collect();
        println!(
            "{:<14} {:<24} {}",
            name,
            profile.description.as_deref().unwrap_or("-"),
            indicators.join(",")
        );
    }

    Ok(())
}
