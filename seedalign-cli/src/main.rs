use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use seedalign_core::{RankOrder, TracebackPolicy};
use std::path::PathBuf;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "seedalign")]
#[command(about = "seedalign - seed-and-extend local sequence search")]
#[command(version)]
#[command(long_about = "
seedalign finds the regions of a reference sequence most similar to a query.
Query words are looked up in a word index of the reference, nearby hits are
merged, and a window around each hit is aligned with Smith-Waterman.

Examples:
  seedalign search --reference genome.txt --query ACGTTGCAACGGTACGATCG
  seedalign search --reference genome.txt --query-file read.fa -k 8 --top-k 10 --json
  seedalign config --output seedalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a reference for the best local alignments of a query
    Search {
        /// Reference sequence file (bare symbols, trailing newline allowed)
        #[arg(long, required = true)]
        reference: PathBuf,

        /// Query sequence given inline
        #[arg(long, conflicts_with = "query_file", required_unless_present = "query_file")]
        query: Option<String>,

        /// Query sequence file (plain, FASTA or FASTQ; the first record is used)
        #[arg(long)]
        query_file: Option<PathBuf>,

        /// Word length for seeding
        #[arg(short = 'k', long = "word-len")]
        k: Option<usize>,

        /// Number of hits to report
        #[arg(long)]
        top_k: Option<usize>,

        /// Seed offsets within this distance of the previous one are merged
        #[arg(long)]
        gap_length: Option<u64>,

        /// Reference window length around each seed (default: twice the query length)
        #[arg(long)]
        window_len: Option<usize>,

        /// Hit ordering
        #[arg(long)]
        rank_by: Option<RankBy>,

        /// Traceback strategy
        #[arg(long)]
        traceback: Option<TracebackMode>,

        /// Score for identical symbols
        #[arg(long = "match")]
        match_score: Option<i32>,

        /// Score for differing symbols
        #[arg(long = "mismatch", allow_hyphen_values = true)]
        mismatch_score: Option<i32>,

        /// Penalty subtracted per gap column
        #[arg(long)]
        gap_penalty: Option<i32>,

        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an example configuration file, or write it with --output
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RankBy {
    Score,
    Offset,
}

impl From<RankBy> for RankOrder {
    fn from(value: RankBy) -> Self {
        match value {
            RankBy::Score => RankOrder::Score,
            RankBy::Offset => RankOrder::Offset,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TracebackMode {
    NeighborMax,
    Recorded,
}

impl From<TracebackMode> for TracebackPolicy {
    fn from(value: TracebackMode) -> Self {
        match value {
            TracebackMode::NeighborMax => TracebackPolicy::NeighborMax,
            TracebackMode::Recorded => TracebackPolicy::Recorded,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    // CLI flag wins over [general] threads
    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Search {
            reference,
            query,
            query_file,
            k,
            top_k,
            gap_length,
            window_len,
            rank_by,
            traceback,
            match_score,
            mismatch_score,
            gap_penalty,
            json,
        } => {
            let overrides = commands::search::SearchOverrides {
                word_len: k,
                top_k,
                gap_length,
                window_len,
                rank_order: rank_by.map(Into::into),
                traceback: traceback.map(Into::into),
                match_score,
                mismatch_score,
                gap_penalty,
            };
            commands::search::execute(&config, reference, query, query_file, overrides, json)?;
        }

        Commands::Config { output } => match output {
            Some(path) => {
                Config::write_example(&path)?;
                log::info!("Wrote example configuration to {}", path.display());
            }
            None => print!("{}", Config::example_toml()?),
        },
    }

    Ok(())
}
