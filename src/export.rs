//! Score-table export.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::tfidf::ScoreRow;

/// Writes the ranking as CSV with `document,term,tf_idf` columns, rows in
/// the order produced by the ranker (group, then descending score).
pub fn write_scores(rows: &[ScoreRow], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("write_scores {} rows -> {}", rows.len(), path.display());
    Ok(())
}
