//! Snapshot normalization — one per-date CSV file into observed rows.
//!
//! A snapshot file holds every instrument's prices for a single trading
//! date. The date is not in the file contents; it comes from the filename
//! stem (`MM_DD_YYYY.csv`). Numeric fields may carry thousands separators
//! ("1,234.50") or be outright garbage — garbage becomes a missing field,
//! never a parse failure for the row.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::ObservedRow;

/// Errors from snapshot loading.
///
/// Everything here is fatal at startup: snapshot filenames follow a
/// controlled naming convention, so a bad date stem means the data source
/// itself is corrupted and the process must not start serving from it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("snapshot filename '{name}' does not encode a date (expected MM_DD_YYYY.csv)")]
    BadDateStem { name: String },

    #[error("snapshot is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Parse one numeric field, stripping comma grouping separators first.
///
/// Returns `None` for anything that still fails to parse as a finite
/// number — the missing marker, not an error.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Derive the trading date from a snapshot filename stem (`MM_DD_YYYY`).
///
/// Unpadded month/day components ("1_5_2024") are accepted.
pub fn date_from_stem(stem: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(stem, "%m_%d_%Y").map_err(|_| LoadError::BadDateStem {
        name: stem.to_string(),
    })
}

/// Read one snapshot, attaching `date` to every row.
///
/// Requires Symbol/Open/High/Low/Close headers (extra columns are ignored).
/// Rows are kept even when every price field fails to parse.
pub fn read_snapshot<R: io::Read>(reader: R, date: NaiveDate) -> Result<Vec<ObservedRow>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn { column: name })
    };

    let symbol_col = column("Symbol")?;
    let open_col = column("Open")?;
    let high_col = column("High")?;
    let low_col = column("Low")?;
    let close_col = column("Close")?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        rows.push(ObservedRow {
            symbol: field(symbol_col).trim().to_string(),
            date,
            open: clean_numeric(field(open_col)),
            high: clean_numeric(field(high_col)),
            low: clean_numeric(field(low_col)),
            close: clean_numeric(field(close_col)),
        });
    }

    Ok(rows)
}

/// Load every `*.csv` snapshot in `dir`, sorted by filename.
///
/// This is the one-shot ingestion step the process runs at startup. Any
/// `LoadError` here aborts the load.
pub fn load_dir(dir: &Path) -> Result<Vec<ObservedRow>, LoadError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();

    let mut rows = Vec::new();
    for path in files {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let date = date_from_stem(stem)?;
        let file = std::fs::File::open(&path)?;
        rows.extend(read_snapshot(file, date)?);
    }

    Ok(rows)
}
