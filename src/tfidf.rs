//! Unsmoothed TF-IDF ranking over per-group corpora.
//!
//! Scoring replicates a plain count vectorizer with unsmoothed idf: raw
//! term count times `ln(N / df) + 1`, no sublinear scaling, no add-one
//! smoothing, no vector normalization. A term found in every group gets
//! idf exactly 1, never zero.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Result, bail};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use serde::Serialize;

use crate::{file_name, read_file, txt_files_in};

lazy_static! {
    // A maximal run of word characters and hyphens is one token, so
    // "мать-и-мачеха" stays whole and punctuation is never tokenized.
    static ref TOKEN: Regex = Regex::new(r"[\w-]+").unwrap();
}

/// The standard NLTK Russian stopword list, consumed as-is.
pub const RUSSIAN_STOPWORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
    "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были",
    "куда", "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой",
    "хоть", "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них",
    "какая", "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой",
    "перед", "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда",
    "конечно", "всю", "между",
];

/// One exported ranking row.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub document: String,
    pub term: String,
    pub tf_idf: f64,
}

/// Built-in Russian stopwords plus an optional file of additional entries,
/// one per line.
pub fn stopword_set(extra: Option<&Path>) -> Result<HashSet<String>> {
    let mut set: HashSet<String> = RUSSIAN_STOPWORDS.iter().map(|s| s.to_string()).collect();
    if let Some(path) = extra {
        set.extend(
            read_file(path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    Ok(set)
}

/// Lowercases, then splits into word-character/hyphen runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Ranks terms per group corpus in `grouped_dir`.
///
/// The vocabulary is the union of all groups' tokens minus stopwords and
/// minus terms present in more than `max_df × N` groups (strict ceiling).
/// Per group, every term occurring in its corpus is scored
/// `tf × (ln(N / df) + 1)` and the top `top_n` rows are kept, sorted by
/// descending score with vocabulary (lexicographic) order breaking ties.
/// Groups appear in lexicographic order.
pub fn rank_terms(
    grouped_dir: &Path,
    stopwords: &HashSet<String>,
    top_n: usize,
    max_df: f64,
) -> Result<Vec<ScoreRow>> {
    let files = txt_files_in(grouped_dir)?;
    if files.is_empty() {
        bail!("no group corpora found in {}", grouped_dir.display());
    }

    let mut names = Vec::with_capacity(files.len());
    let mut counts: Vec<HashMap<String, u64>> = Vec::with_capacity(files.len());
    for path in &files {
        let name = file_name(path)?;
        names.push(name.strip_suffix(".txt").unwrap_or(name).to_string());
        let mut tf: HashMap<String, u64> = HashMap::new();
        for token in tokenize(&read_file(path)?) {
            if !stopwords.contains(&token) {
                *tf.entry(token).or_insert(0) += 1;
            }
        }
        counts.push(tf);
    }

    let mut df: HashMap<&str, usize> = HashMap::new();
    for tf in &counts {
        for term in tf.keys() {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let n = names.len() as f64;
    let ceiling = max_df * n;
    let mut vocabulary: Vec<&str> = df
        .iter()
        .filter(|(_, d)| **d as f64 <= ceiling)
        .map(|(term, _)| *term)
        .collect();
    vocabulary.sort_unstable();
    info!("rank_terms: {} groups, vocabulary size {}", names.len(), vocabulary.len());

    let mut rows = Vec::new();
    for (name, tf) in names.iter().zip(&counts) {
        let mut group_rows: Vec<ScoreRow> = vocabulary
            .iter()
            .filter_map(|&term| {
                let count = *tf.get(term)? as f64;
                let idf = (n / df[term] as f64).ln() + 1.0;
                Some(ScoreRow {
                    document: name.clone(),
                    term: term.to_string(),
                    tf_idf: count * idf,
                })
            })
            .collect();
        // stable sort keeps vocabulary order among exact ties
        group_rows.sort_by(|a, b| {
            b.tf_idf.partial_cmp(&a.tf_idf).unwrap_or(Ordering::Equal)
        });
        group_rows.truncate(top_n);
        rows.extend(group_rows);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rank(dir: &Path, top_n: usize, max_df: f64) -> Vec<ScoreRow> {
        rank_terms(dir, &HashSet::new(), top_n, max_df).unwrap()
    }

    fn group_rows<'a>(rows: &'a [ScoreRow], group: &str) -> Vec<&'a ScoreRow> {
        rows.iter().filter(|r| r.document == group).collect()
    }

    #[test]
    fn hyphenated_words_are_single_tokens() {
        assert_eq!(
            tokenize("Цвела мать-и-мачеха, и всё!"),
            vec!["цвела", "мать-и-мачеха", "и", "всё"]
        );
    }

    #[test]
    fn term_in_every_group_gets_idf_one() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "гроза").unwrap();
        fs::write(dir.path().join("b.txt"), "гроза гроза").unwrap();

        let rows = rank(dir.path(), 100, 1.0);
        let a = group_rows(&rows, "a");
        assert_eq!(a[0].term, "гроза");
        assert!((a[0].tf_idf - 1.0).abs() < 1e-12);
        let b = group_rows(&rows, "b");
        assert!((b[0].tf_idf - 2.0).abs() < 1e-12);
    }

    #[test]
    fn two_group_reference_scores() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "кот кот собака").unwrap();
        fs::write(dir.path().join("b.txt"), "собака собака").unwrap();

        let rows = rank(dir.path(), 100, 1.0);

        let a = group_rows(&rows, "a");
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].term, "кот");
        assert!((a[0].tf_idf - 2.0 * (2.0_f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(a[1].term, "собака");
        assert!((a[1].tf_idf - 1.0).abs() < 1e-12);

        let b = group_rows(&rows, "b");
        assert_eq!(b.len(), 1, "кот never occurs in b");
        assert_eq!(b[0].term, "собака");
        assert!((b[0].tf_idf - 2.0).abs() < 1e-12);
    }

    #[test]
    fn frequency_ceiling_excludes_too_common_terms_entirely() {
        let dir = tempfile::tempdir().unwrap();
        // "завод" is in all three groups and would rank top-1 by raw count
        fs::write(dir.path().join("a.txt"), "завод завод завод завод сад").unwrap();
        fs::write(dir.path().join("b.txt"), "завод завод завод завод луг").unwrap();
        fs::write(dir.path().join("c.txt"), "завод завод завод завод бор").unwrap();

        let rows = rank(dir.path(), 100, 0.9);
        assert!(rows.iter().all(|r| r.term != "завод"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn stopwords_never_enter_the_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "и вот пришла гроза").unwrap();
        fs::write(dir.path().join("b.txt"), "и ушла").unwrap();

        let stop = stopword_set(None).unwrap();
        let rows = rank_terms(dir.path(), &stop, 100, 1.0).unwrap();
        assert!(rows.iter().all(|r| r.term != "и" && r.term != "вот"));
        assert!(rows.iter().any(|r| r.term == "гроза"));
    }

    #[test]
    fn per_group_rows_are_capped_and_non_increasing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "ели ели ели сосны сосны клены дубы вязы").unwrap();
        fs::write(dir.path().join("b.txt"), "липы").unwrap();

        let rows = rank(dir.path(), 3, 1.0);
        let a = group_rows(&rows, "a");
        assert_eq!(a.len(), 3);
        assert!(a.windows(2).all(|w| w[0].tf_idf >= w[1].tf_idf));
        // ties broken by vocabulary order, stable
        assert_eq!(a[0].term, "ели");
        assert_eq!(a[1].term, "сосны");
        assert_eq!(a[2].term, "вязы");
    }

    #[test]
    fn extra_stopword_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let extra = dir.path().join("extra.txt");
        fs::write(&extra, "гроза\n\n").unwrap();
        let set = stopword_set(Some(&extra)).unwrap();
        assert!(set.contains("гроза"));
        assert!(set.contains("и"));
    }
}
