#![forbid(unsafe_code)]
//! # play_terms CLI
//!
//! Command-line front end for the play-script TF-IDF pipeline.
//!
//! The default mode runs the full pipeline: speech extraction, punctuation
//! stripping, proper-noun removal against the reviewed deny-list,
//! mystem lemmatization, genre grouping, and TF-IDF ranking with CSV
//! export. `--harvest` instead produces the per-play capitalized-token
//! files that are reviewed by hand and promoted into the deny-list
//! directory before the main run.
//!
//! ## Example
//! ```bash
//! play_terms plays_tei --groups play_groups.json --work-dir tartu
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process;

use play_terms::{Mystem, PipelineConfig, run_harvest, run_pipeline};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory tree of TEI-encoded play scripts (*.xml)
    corpus: PathBuf,

    /// Directory receiving every intermediate stage and the final table
    #[arg(long, default_value = "tartu")]
    work_dir: PathBuf,

    /// Path to the play -> genre-group mapping (JSON object)
    #[arg(long, required_unless_present = "harvest")]
    groups: Option<PathBuf>,

    /// Path to the mystem binary
    #[arg(long, default_value = "mystem")]
    mystem: PathBuf,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Number of top-scoring terms kept per group
    #[arg(long, default_value_t = 100)]
    top: usize,

    /// Drop terms present in more than this fraction of groups
    #[arg(long, default_value_t = 0.9)]
    max_df: f64,

    /// Harvest per-play capitalized tokens for deny-list review instead of
    /// running the pipeline
    #[arg(long, default_value_t = false)]
    harvest: bool,

    /// With --harvest, also extract cast-member lines per play
    #[arg(long, default_value_t = false)]
    cast: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mystem = Mystem::new(&cli.mystem);

    if cli.harvest {
        if let Err(e) = run_harvest(&cli.corpus, &cli.work_dir, &mystem, cli.cast) {
            error!("Error: {e:#}");
            process::exit(1);
        }
        return;
    }

    let cfg = PipelineConfig {
        corpus_dir: cli.corpus,
        work_dir: cli.work_dir,
        // clap guarantees presence when --harvest is absent
        mapping_file: cli.groups.unwrap_or_default(),
        extra_stopwords: cli.stopwords,
        top_n: cli.top,
        max_df: cli.max_df,
    };
    match run_pipeline(&cfg, &mystem) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            error!("Error: {e:#}");
            process::exit(1);
        }
    }
}
