//! Batch scan façade — the shape the transport layer speaks.
//!
//! One request carries a list of symbols, a shared smoothing period, and an
//! optional as-of date. The response carries one entry per requested symbol
//! in input order; a symbol with no eligible data gets an error marker and
//! the rest of the batch is unaffected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification};
use crate::data::PriceTable;

fn default_period() -> usize {
    90
}

/// Scan request as received from the transport layer.
///
/// The core assumes a validated request (`ema_period >= 1`); the boundary
/// rejects anything else before calling in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub symbols: Vec<String>,
    #[serde(default = "default_period")]
    pub ema_period: usize,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Per-symbol outcome: a full classification or a named error marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SymbolResult {
    Classified(Classification),
    NoData { symbol: String, error: String },
}

/// Batch response, echoing the period and date the scan ran with.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub results: Vec<SymbolResult>,
    pub ema_period: usize,
    pub date: Option<NaiveDate>,
}

/// Classify every requested symbol, preserving input order.
pub fn scan(table: &PriceTable, request: &ScanRequest) -> ScanResponse {
    let results = request
        .symbols
        .iter()
        .map(|symbol| {
            match classify(table, symbol, request.ema_period, request.date) {
                Ok(classification) => SymbolResult::Classified(classification),
                Err(err) => SymbolResult::NoData {
                    symbol: symbol.clone(),
                    error: err.to_string(),
                },
            }
        })
        .collect();

    ScanResponse {
        results,
        ema_period: request.ema_period,
        date: request.date,
    }
}
