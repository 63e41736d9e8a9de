//! Lemmatization stage.
//!
//! One external-tool call per document (not per line) to amortize process
//! startup. A tool failure aborts the stage: a partially lemmatized corpus
//! would silently corrupt the downstream scores.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::morph::Morph;
use crate::normalize::strip_non_word;
use crate::{create_dir, file_name, read_file, txt_files_in, write_file};

/// Reduces every document to lowercased dictionary forms, then re-strips
/// non-word characters the tool may have reintroduced.
pub fn lemmatize(src_dir: &Path, dst_dir: &Path, lemmatizer: &dyn Morph) -> Result<()> {
    create_dir(dst_dir)?;
    for src in txt_files_in(src_dir)? {
        let dst = dst_dir.join(file_name(&src)?);
        info!("lemmatize {} -> {}", src.display(), dst.display());

        let lemmatized = lemmatizer
            .lemmatize(&read_file(&src)?)
            .with_context(|| format!("lemmatizing {}", src.display()))?;
        write_file(&dst, &strip_non_word(&lemmatized))?;
    }
    Ok(())
}
