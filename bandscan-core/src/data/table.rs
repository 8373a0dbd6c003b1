//! The shared price table and its sorted per-symbol views.
//!
//! `PriceTable::build` runs exactly once at process start. It establishes
//! the one ordering invariant every query relies on — rows ascending by
//! `(symbol, date)`, at most one row per pair — and nothing downstream is
//! allowed to re-sort. `SeriesView` is the typed witness of that invariant:
//! the only way to get one is through the sorted table, so a classifier
//! holding a view never has to verify ordering itself.

use chrono::NaiveDate;

use crate::domain::ObservedRow;

/// All observed rows across every snapshot, sorted ascending by
/// `(symbol, date)` and deduped keep-first. Immutable after build.
#[derive(Debug)]
pub struct PriceTable {
    rows: Vec<ObservedRow>,
}

impl PriceTable {
    /// Merge normalized rows from every snapshot into the shared table.
    ///
    /// Sorting is stable, so when the same `(symbol, date)` pair appears
    /// more than once the earliest-loaded row wins.
    pub fn build(mut rows: Vec<ObservedRow>) -> Self {
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.date.cmp(&b.date)));
        rows.dedup_by(|a, b| a.symbol == b.symbol && a.date == b.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[ObservedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows for one symbol, ascending by date.
    ///
    /// Rows for a symbol are contiguous in the sorted table, so this is two
    /// binary searches and a borrow — no per-request allocation.
    pub fn series(&self, symbol: &str) -> SeriesView<'_> {
        let start = self.rows.partition_point(|r| r.symbol.as_str() < symbol);
        let end = self.rows.partition_point(|r| r.symbol.as_str() <= symbol);
        SeriesView {
            rows: &self.rows[start..end],
        }
    }

    /// Sorted distinct symbols across the full history.
    pub fn symbols(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            if out.last().map(String::as_str) != Some(row.symbol.as_str()) {
                out.push(row.symbol.clone());
            }
        }
        out
    }
}

/// Date-ascending view over one symbol's rows.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    rows: &'a [ObservedRow],
}

impl<'a> SeriesView<'a> {
    pub fn rows(&self) -> &'a [ObservedRow] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The prefix of this view with `date <= cutoff`.
    pub fn up_to(&self, cutoff: NaiveDate) -> SeriesView<'a> {
        let end = self.rows.partition_point(|r| r.date <= cutoff);
        SeriesView {
            rows: &self.rows[..end],
        }
    }
}
