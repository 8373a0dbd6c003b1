//! Chunked close-history export for the static front-end.
//!
//! A one-shot offline pass over the built table: every `(symbol, date,
//! close)` fact, grouped into fixed-size chunks of trading dates, each chunk
//! rendered as a `window.DATA_BATCH_{id}` script plus an index script
//! listing the chunk ids. Never a request-time dependency of the scanner.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::PriceTable;

/// One close-price observation, as the front-end consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseFact {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
}

/// A fixed-size group of trading dates and every close fact on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: usize,
    pub facts: Vec<CloseFact>,
}

/// Group the table's close history into chunks of `dates_per_chunk`
/// consecutive trading dates.
///
/// Facts within a chunk are ordered by `(date, symbol)`; rows with a
/// missing close are skipped. Chunk ids are dense from zero.
pub fn chunk_close_history(table: &PriceTable, dates_per_chunk: usize) -> Vec<Chunk> {
    assert!(dates_per_chunk >= 1, "chunk size must be >= 1");

    let dates: BTreeSet<NaiveDate> = table.rows().iter().map(|r| r.date).collect();
    let chunk_of: HashMap<NaiveDate, usize> = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| (date, i / dates_per_chunk))
        .collect();

    let chunk_count = dates.len().div_ceil(dates_per_chunk);
    let mut chunks: Vec<Chunk> = (0..chunk_count)
        .map(|id| Chunk {
            id,
            facts: Vec::new(),
        })
        .collect();

    let mut facts: Vec<CloseFact> = table
        .rows()
        .iter()
        .filter_map(|r| {
            Some(CloseFact {
                symbol: r.symbol.clone(),
                date: r.date,
                close: r.close?,
            })
        })
        .collect();
    facts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.symbol.cmp(&b.symbol)));

    for fact in facts {
        if let Some(&id) = chunk_of.get(&fact.date) {
            chunks[id].facts.push(fact);
        }
    }

    chunks
}

/// Render one chunk as a `window.DATA_BATCH_{id}` script.
pub fn batch_script(chunk: &Chunk) -> Result<String, serde_json::Error> {
    Ok(format!(
        "window.DATA_BATCH_{} = {};",
        chunk.id,
        serde_json::to_string(&chunk.facts)?
    ))
}

/// Render the index script listing every chunk id.
pub fn index_script(chunks: &[Chunk]) -> Result<String, serde_json::Error> {
    let ids: Vec<usize> = chunks.iter().map(|c| c.id).collect();
    Ok(format!(
        "window.DATA_BATCHES = {};",
        serde_json::to_string(&ids)?
    ))
}
