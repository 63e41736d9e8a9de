//! Speech extraction from TEI markup.
//!
//! The corpus is hand-edited TEI where every speech span sits on a single
//! physical line, so extraction is deliberately line-local regex work rather
//! than a full XML parse. Markup spanning multiple physical lines is a known
//! limitation and is not handled.

use std::path::Path;

use anyhow::{Result, bail};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use walkdir::WalkDir;

use crate::{create_dir, file_name, read_file, write_file};

lazy_static! {
    static ref STAGE_DIRECTION: Regex = Regex::new(r"\s*<stage>.*?</stage>").unwrap();
    static ref NOTE: Regex = Regex::new(r"\s*<note.*?>.*?</note>").unwrap();
    // Prose paragraphs and verse lines, captured in the order they appear.
    static ref SPEECH_SPAN: Regex = Regex::new(r"<p>(.+?)</p>|<l>(.+?)</l>").unwrap();
    static ref CAST_ITEM: Regex = Regex::new(r"<castItem>(.+?)</castItem>").unwrap();
}

/// Pulls the inner text of every prose/verse span out of one markup
/// document, after deleting stage directions and notes (including their
/// content) from each line.
pub fn extract_speech_lines(markup: &str) -> Vec<String> {
    let mut speech = Vec::new();
    for line in markup.lines() {
        let line = STAGE_DIRECTION.replace_all(line, "");
        let line = NOTE.replace_all(&line, "");
        for caps in SPEECH_SPAN.captures_iter(&line) {
            if let Some(inner) = caps.get(1).or_else(|| caps.get(2)) {
                speech.push(inner.as_str().to_string());
            }
        }
    }
    speech
}

/// Scans `src_dir` recursively for `*.xml` plays and writes one flat
/// `<name>.xml.txt` speech file per play into `dst_dir`, one extracted span
/// per line.
pub fn extract_speech(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    if !src_dir.is_dir() {
        bail!("source corpus directory not found: {}", src_dir.display());
    }
    create_dir(dst_dir)?;

    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map(|e| e != "xml").unwrap_or(true) {
            continue;
        }
        let dst = dst_dir.join(format!("{}.txt", file_name(path)?));
        info!("extract_speech {} -> {}", path.display(), dst.display());

        let markup = read_file(path)?;
        let mut out = String::new();
        for line in extract_speech_lines(&markup) {
            out.push_str(&line);
            out.push('\n');
        }
        write_file(&dst, &out)?;
    }
    Ok(())
}

/// Offline helper for deny-list curation: pulls `<castItem>` lines per play
/// into `dst_dir`.
pub fn extract_cast_items(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    if !src_dir.is_dir() {
        bail!("source corpus directory not found: {}", src_dir.display());
    }
    create_dir(dst_dir)?;

    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map(|e| e != "xml").unwrap_or(true) {
            continue;
        }
        let dst = dst_dir.join(format!("{}.txt", file_name(path)?));
        info!("extract_cast_items {} -> {}", path.display(), dst.display());

        let markup = read_file(path)?;
        let mut out = String::new();
        for line in markup.lines() {
            for caps in CAST_ITEM.captures_iter(line) {
                if let Some(inner) = caps.get(1) {
                    out.push_str(inner.as_str());
                    out.push('\n');
                }
            }
        }
        write_file(&dst, &out)?;
    }
    Ok(())
}
