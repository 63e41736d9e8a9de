//! Adapter over the external morphological tool (mystem).
//!
//! The pipeline only ever needs two operations from it, so they sit behind
//! a narrow trait that tests can implement without the real binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Narrow interface over the external morphological tool.
pub trait Morph {
    /// Tagging mode: annotates each input token with inline grammatical
    /// information (case, gender, role).
    fn tag(&self, text: &str) -> Result<String>;

    /// Lemmatization mode: lowercased dictionary forms with stray
    /// formatting removed.
    fn lemmatize(&self, text: &str) -> Result<String>;
}

/// The mystem command-line tool, invoked once per document with a source
/// and destination path as positional arguments.
pub struct Mystem {
    path: PathBuf,
}

impl Mystem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Mystem { path: path.into() }
    }

    fn run(&self, mode: &str, text: &str) -> Result<String> {
        // mystem's invocation environment cannot take non-ASCII paths
        // reliably, so input is staged under ASCII scratch names. The
        // scratch directory is removed on drop, on error paths included.
        let scratch = tempfile::tempdir().context("creating mystem scratch directory")?;
        let src = scratch.path().join("1.txt");
        let dst = scratch.path().join("2.txt");
        fs::write(&src, text).with_context(|| format!("writing {}", src.display()))?;

        let output = Command::new(&self.path)
            .arg(mode)
            .arg(&src)
            .arg(&dst)
            .output()
            .with_context(|| format!("running {}", self.path.display()))?;
        if !output.status.success() {
            bail!(
                "{} {} failed ({}): {}",
                self.path.display(),
                mode,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        fs::read_to_string(&dst).with_context(|| format!("reading {}", dst.display()))
    }
}

impl Morph for Mystem {
    fn tag(&self, text: &str) -> Result<String> {
        self.run("-ci", text)
    }

    fn lemmatize(&self, text: &str) -> Result<String> {
        self.run("-lcd", text)
    }
}
