#![forbid(unsafe_code)]
//! # play_terms
//!
//! Batch text-analytics pipeline that turns a corpus of TEI-encoded play
//! scripts into per-genre-group TF-IDF term rankings.
//!
//! The pipeline runs six sequential stages, each one reading the previous
//! stage's output directory and materializing its own before the next stage
//! starts. Every intermediate artifact is kept on disk for auditing:
//!
//! 1. speech extraction from markup (`01_extract_speech`)
//! 2. punctuation stripping (`02_strip_punctuation`)
//! 3. proper-noun removal against a reviewed deny-list (`03_remove_proper_nouns`)
//! 4. lemmatization via the external mystem tool (`04_lemmatize`)
//! 5. concatenation into per-genre-group corpora (`05_speech_grouped`)
//! 6. TF-IDF ranking and CSV export (`tf_idf.csv`)
//!
//! The deny-list is produced by a separate offline harvest pass
//! (`--harvest` on the CLI) whose per-play output is reviewed by hand and
//! promoted into the `proper_nouns/` directory before the main run.

pub mod export;
pub mod extract;
pub mod groups;
pub mod lemmatize;
pub mod morph;
pub mod normalize;
pub mod proper_nouns;
pub mod tfidf;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use export::write_scores;
pub use extract::{extract_cast_items, extract_speech};
pub use groups::{GroupMapping, group_documents, load_mapping};
pub use lemmatize::lemmatize;
pub use morph::{Morph, Mystem};
pub use normalize::strip_punctuation;
pub use proper_nouns::{harvest_proper_nouns, load_deny_list, remove_proper_nouns};
pub use tfidf::{ScoreRow, rank_terms, stopword_set};

/// Stage directories created under the work directory, in pipeline order.
pub const EXTRACT_SPEECH_DIR: &str = "01_extract_speech";
pub const STRIP_PUNCTUATION_DIR: &str = "02_strip_punctuation";
pub const REMOVE_PROPER_NOUNS_DIR: &str = "03_remove_proper_nouns";
pub const LEMMATIZE_DIR: &str = "04_lemmatize";
pub const GROUPED_DIR: &str = "05_speech_grouped";

/// Reviewed deny-list files live directly in this directory; the raw harvest
/// output goes to the `by_play` subdirectory and is promoted by hand.
pub const PROPER_NOUNS_DIR: &str = "proper_nouns";
pub const PROPER_NOUNS_BY_PLAY_DIR: &str = "proper_nouns/by_play";
pub const CAST_ITEMS_BY_PLAY_DIR: &str = "cast_item/by_play";

/// Name of the exported score table under the work directory.
pub const SCORES_FILE: &str = "tf_idf.csv";

/// Everything the full pipeline run needs to know.
pub struct PipelineConfig {
    /// Directory tree of TEI-encoded source plays (`*.xml`).
    pub corpus_dir: PathBuf,
    /// Directory that receives every stage's output.
    pub work_dir: PathBuf,
    /// JSON object mapping play filename to genre-group name.
    pub mapping_file: PathBuf,
    /// Optional file of additional stopwords, one per line.
    pub extra_stopwords: Option<PathBuf>,
    /// Number of top-scoring terms kept per group.
    pub top_n: usize,
    /// Group-frequency ceiling as a fraction of the group count.
    pub max_df: f64,
}

/// Runs the whole pipeline and returns the path of the exported score table.
///
/// The group mapping and the deny-list are loaded and validated up front so
/// that configuration errors surface before any stage writes output.
pub fn run_pipeline(cfg: &PipelineConfig, lemmatizer: &dyn Morph) -> Result<PathBuf> {
    let mapping = groups::load_mapping(&cfg.mapping_file)?;
    let stopwords = tfidf::stopword_set(cfg.extra_stopwords.as_deref())?;
    let deny = proper_nouns::load_deny_list(&cfg.work_dir.join(PROPER_NOUNS_DIR))?;

    let work = &cfg.work_dir;
    extract::extract_speech(&cfg.corpus_dir, &work.join(EXTRACT_SPEECH_DIR))?;
    normalize::strip_punctuation(
        &work.join(EXTRACT_SPEECH_DIR),
        &work.join(STRIP_PUNCTUATION_DIR),
    )?;
    proper_nouns::remove_proper_nouns(
        &work.join(STRIP_PUNCTUATION_DIR),
        &work.join(REMOVE_PROPER_NOUNS_DIR),
        &deny,
    )?;
    lemmatize::lemmatize(
        &work.join(REMOVE_PROPER_NOUNS_DIR),
        &work.join(LEMMATIZE_DIR),
        lemmatizer,
    )?;
    groups::group_documents(&work.join(LEMMATIZE_DIR), &work.join(GROUPED_DIR), &mapping)?;

    let rows = tfidf::rank_terms(&work.join(GROUPED_DIR), &stopwords, cfg.top_n, cfg.max_df)?;
    let out = work.join(SCORES_FILE);
    export::write_scores(&rows, &out)?;
    Ok(out)
}

/// Offline harvest pass: extracts speech, then writes per-play capitalized
/// token files (tagged by the external tool) for deny-list review. With
/// `cast` set, also pulls cast-member lines per play.
pub fn run_harvest(
    corpus_dir: &Path,
    work_dir: &Path,
    tagger: &dyn Morph,
    cast: bool,
) -> Result<()> {
    extract::extract_speech(corpus_dir, &work_dir.join(EXTRACT_SPEECH_DIR))?;
    proper_nouns::harvest_proper_nouns(
        &work_dir.join(EXTRACT_SPEECH_DIR),
        &work_dir.join(PROPER_NOUNS_BY_PLAY_DIR),
        tagger,
    )?;
    if cast {
        extract::extract_cast_items(corpus_dir, &work_dir.join(CAST_ITEMS_BY_PLAY_DIR))?;
    }
    Ok(())
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

pub(crate) fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))
}

/// Plain `.txt` files directly inside `dir`, sorted by name for
/// reproducible stage output.
pub(crate) fn txt_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().map(|e| e == "txt").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("non-UTF-8 filename: {}", path.display()))
}
