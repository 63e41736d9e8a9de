//! Punctuation stripping.
//!
//! A deterministic whole-document transform, applied once between
//! extraction and proper-noun removal and re-applied (first rule only)
//! after lemmatization, since the external tool can reintroduce stray
//! punctuation. No case or Unicode normalization happens here.

use std::path::Path;

use anyhow::Result;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::{create_dir, file_name, read_file, txt_files_in, write_file};

lazy_static! {
    // Everything except word characters, whitespace and hyphens.
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s-]").unwrap();
    // Hyphen/en-dash/em-dash used as punctuation (whitespace on both
    // sides); intra-word hyphens survive.
    static ref FLOATING_DASH: Regex = Regex::new(r"\s+[-–—]\s+").unwrap();
    static ref REPEATED_SPACES: Regex = Regex::new(r" {2,}").unwrap();
    static ref LINE_LEADING_SPACES: Regex = Regex::new(r"\n +").unwrap();
}

/// Deletes every character that is not a word character, whitespace or a
/// hyphen.
pub fn strip_non_word(content: &str) -> String {
    NON_WORD.replace_all(content, "").into_owned()
}

/// Full punctuation strip. Idempotent on its own output.
pub fn strip_punctuation_text(content: &str) -> String {
    let content = strip_non_word(content);
    let content = FLOATING_DASH.replace_all(&content, " ");
    let content = REPEATED_SPACES.replace_all(&content, " ");
    LINE_LEADING_SPACES.replace_all(&content, "\n").into_owned()
}

/// Applies [`strip_punctuation_text`] to every extracted-speech document.
pub fn strip_punctuation(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    create_dir(dst_dir)?;
    for src in txt_files_in(src_dir)? {
        let dst = dst_dir.join(file_name(&src)?);
        info!("strip_punctuation {} -> {}", src.display(), dst.display());
        write_file(&dst, &strip_punctuation_text(&read_file(&src)?))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_punctuation_keeps_words_and_hyphens() {
        let stripped = strip_punctuation_text("Ну, что-же?! (пауза)");
        assert_eq!(stripped, "Ну что-же пауза");
    }

    #[test]
    fn collapses_floating_dashes_but_keeps_hyphenated_words() {
        let stripped = strip_punctuation_text("жизнь — борьба, мать-и-мачеха");
        assert_eq!(stripped, "жизнь борьба мать-и-мачеха");
    }

    #[test]
    fn collapses_repeated_spaces_and_line_leading_spaces() {
        let stripped = strip_punctuation_text("слово   слово\n  отступ");
        assert_eq!(stripped, "слово слово\nотступ");
    }

    #[test]
    fn is_idempotent() {
        let input = "Кто — там?..  Это я,   «друг»!\n - Входи; живо-живо.\n";
        let once = strip_punctuation_text(input);
        let twice = strip_punctuation_text(&once);
        assert_eq!(once, twice);
    }
}
