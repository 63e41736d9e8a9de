//! Genre-group mapping and per-group corpus concatenation.
//!
//! The play-to-group mapping is hand-maintained configuration, loaded from
//! a JSON object and validated against the corpus: a lemmatized document
//! without a mapping entry is a data-integrity error, never a silent drop.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::{create_dir, file_name, read_file, txt_files_in, write_file};

/// Play filename (`*.xml`) to genre-group name. A `BTreeMap` keeps group
/// assembly order deterministic across runs.
pub type GroupMapping = BTreeMap<String, String>;

/// Loads and sanity-checks the mapping file.
pub fn load_mapping(path: &Path) -> Result<GroupMapping> {
    let content = read_file(path)?;
    let mapping: GroupMapping = serde_json::from_str(&content)
        .with_context(|| format!("parsing group mapping {}", path.display()))?;
    if mapping.is_empty() {
        bail!("group mapping {} is empty", path.display());
    }
    if let Some((play, _)) = mapping.iter().find(|(play, group)| play.is_empty() || group.is_empty()) {
        bail!(
            "group mapping {} has an empty play or group name (play entry: {:?})",
            path.display(),
            play
        );
    }
    Ok(mapping)
}

/// Concatenates the lemmatized documents of each group (newline-joined, in
/// mapping order) into one `<group>.txt` corpus per group.
///
/// Fails if any document in `lemma_dir` has no group assignment, listing
/// the offenders, and if a mapped document is missing from `lemma_dir`.
pub fn group_documents(lemma_dir: &Path, dst_dir: &Path, mapping: &GroupMapping) -> Result<()> {
    let mut unmapped = Vec::new();
    for doc in txt_files_in(lemma_dir)? {
        let name = file_name(&doc)?;
        let play = name.strip_suffix(".txt").unwrap_or(name);
        if !mapping.contains_key(play) {
            unmapped.push(play.to_string());
        }
    }
    if !unmapped.is_empty() {
        bail!(
            "documents without a group assignment: {}",
            unmapped.join(", ")
        );
    }

    let mut members: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (play, group) in mapping {
        members.entry(group.as_str()).or_default().push(play.as_str());
    }

    create_dir(dst_dir)?;
    for (group, plays) in &members {
        let mut texts = Vec::with_capacity(plays.len());
        for play in plays {
            texts.push(read_file(&lemma_dir.join(format!("{play}.txt")))?);
        }
        let dst = dst_dir.join(format!("{group}.txt"));
        info!("group_documents {} plays -> {}", plays.len(), dst.display());
        write_file(&dst, &texts.join("\n"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mapping(pairs: &[(&str, &str)]) -> GroupMapping {
        pairs
            .iter()
            .map(|(play, group)| (play.to_string(), group.to_string()))
            .collect()
    }

    #[test]
    fn concatenates_member_documents_per_group() {
        let lemma = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(lemma.path().join("а.xml.txt"), "первый текст").unwrap();
        fs::write(lemma.path().join("б.xml.txt"), "второй текст").unwrap();
        fs::write(lemma.path().join("в.xml.txt"), "третий текст").unwrap();

        let mapping = mapping(&[
            ("а.xml", "детские"),
            ("б.xml", "военные"),
            ("в.xml", "детские"),
        ]);
        group_documents(lemma.path(), out.path(), &mapping).unwrap();

        let children = fs::read_to_string(out.path().join("детские.txt")).unwrap();
        assert_eq!(children, "первый текст\nтретий текст");
        let war = fs::read_to_string(out.path().join("военные.txt")).unwrap();
        assert_eq!(war, "второй текст");
    }

    #[test]
    fn groups_partition_the_document_set() {
        let lemma = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        for name in ["а.xml.txt", "б.xml.txt"] {
            fs::write(lemma.path().join(name), name).unwrap();
        }
        let mapping = mapping(&[("а.xml", "одни"), ("б.xml", "другие")]);
        group_documents(lemma.path(), out.path(), &mapping).unwrap();

        // every document lands in exactly one group corpus
        let one = fs::read_to_string(out.path().join("одни.txt")).unwrap();
        let other = fs::read_to_string(out.path().join("другие.txt")).unwrap();
        assert_eq!(one, "а.xml.txt");
        assert_eq!(other, "б.xml.txt");
    }

    #[test]
    fn unmapped_document_is_reported_not_dropped() {
        let lemma = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(lemma.path().join("известная.xml.txt"), "текст").unwrap();
        fs::write(lemma.path().join("лишняя.xml.txt"), "текст").unwrap();

        let mapping = mapping(&[("известная.xml", "группа")]);
        let err = group_documents(lemma.path(), out.path(), &mapping).unwrap_err();
        assert!(err.to_string().contains("лишняя.xml"));
    }

    #[test]
    fn mapped_document_missing_from_corpus_is_fatal() {
        let lemma = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(lemma.path().join("есть.xml.txt"), "текст").unwrap();

        let mapping = mapping(&[("есть.xml", "группа"), ("нет.xml", "группа")]);
        let err = group_documents(lemma.path(), out.path(), &mapping).unwrap_err();
        assert!(format!("{err:#}").contains("нет.xml.txt"));
    }

    #[test]
    fn empty_mapping_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, "{}").unwrap();
        assert!(load_mapping(&path).is_err());
    }
}
