//! Proper-noun harvesting, deny-list loading and whole-token removal.
//!
//! Harvesting is an offline pass: capitalized tokens are collected per
//! play, tagged by the external tool, and split into name-bearing and
//! other lines for human review. The reviewed files are promoted into the
//! deny-list directory by hand; the main pipeline only reads that
//! directory.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::Result;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::morph::Morph;
use crate::{create_dir, file_name, read_file, txt_files_in, write_file};

lazy_static! {
    // Tokens that begin with an uppercase Latin or Cyrillic letter.
    static ref CAPITALIZED: Regex = Regex::new(r"\b[A-ZА-ЯЁ]\S+\b").unwrap();
    // Inline tag annotations produced by the tagger, e.g. "{иван=S,имя,муж}".
    static ref TAG_ANNOTATION: Regex = Regex::new(r"\{.*?\}").unwrap();
}

/// Grammatical-role markers in tagger output that make a line
/// name-bearing: first name, surname, patronymic.
const NAME_MARKERS: [&str; 3] = ["имя", "фам", "отч"];

/// Distinct capitalized tokens of a document, sorted.
pub fn capitalized_tokens(text: &str) -> Vec<String> {
    let set: BTreeSet<&str> = CAPITALIZED.find_iter(text).map(|m| m.as_str()).collect();
    set.into_iter().map(String::from).collect()
}

/// Splits tagged lines into name-bearing lines (sorted) and the rest
/// (original order). The split is a review convenience only.
pub fn split_tagged_lines(tagged: &str) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut others = Vec::new();
    for line in tagged.lines() {
        if NAME_MARKERS.iter().any(|marker| line.contains(marker)) {
            names.push(line.to_string());
        } else {
            others.push(line.to_string());
        }
    }
    names.sort();
    (names, others)
}

/// Writes one reviewable proper-noun candidate file per extracted-speech
/// document: sorted name-bearing lines, three blank separator lines, then
/// the remaining tagged lines.
pub fn harvest_proper_nouns(speech_dir: &Path, dst_dir: &Path, tagger: &dyn Morph) -> Result<()> {
    create_dir(dst_dir)?;
    for src in txt_files_in(speech_dir)? {
        let dst = dst_dir.join(file_name(&src)?);
        info!("harvest_proper_nouns {} -> {}", src.display(), dst.display());

        let tokens = capitalized_tokens(&read_file(&src)?);
        let tagged = tagger.tag(&tokens.join("\n"))?;
        let (names, others) = split_tagged_lines(&tagged);

        let mut lines = names;
        lines.extend([String::new(), String::new(), String::new()]);
        lines.extend(others);
        write_file(&dst, &lines.join("\n"))?;
    }
    Ok(())
}

/// Unions every reviewed deny-list file directly inside `dir`
/// (non-recursive), with tag annotations stripped and empty lines
/// dropped. Case-preserving; membership tests downstream are exact.
pub fn load_deny_list(dir: &Path) -> Result<HashSet<String>> {
    let mut deny = HashSet::new();
    for path in txt_files_in(dir)? {
        let content = read_file(&path)?;
        let content = TAG_ANNOTATION.replace_all(&content, "");
        deny.extend(
            content
                .lines()
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if deny.is_empty() {
        warn!(
            "deny-list from {} is empty; no proper nouns will be removed",
            dir.display()
        );
    }
    Ok(deny)
}

/// Drops every space-delimited token that exactly matches a deny-list
/// entry. Token order and all non-matching tokens are preserved; there is
/// no partial-token matching.
pub fn remove_tokens(line: &str, deny: &HashSet<String>) -> String {
    line.split(' ')
        .filter(|token| !deny.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies [`remove_tokens`] line by line to every stripped document.
pub fn remove_proper_nouns(src_dir: &Path, dst_dir: &Path, deny: &HashSet<String>) -> Result<()> {
    create_dir(dst_dir)?;
    for src in txt_files_in(src_dir)? {
        let dst = dst_dir.join(file_name(&src)?);
        info!("remove_proper_nouns {} -> {}", src.display(), dst.display());

        let content = read_file(&src)?;
        let cleaned: Vec<String> = content
            .split('\n')
            .map(|line| remove_tokens(line, deny))
            .collect();
        write_file(&dst, &cleaned.join("\n"))?;
    }
    Ok(())
}
