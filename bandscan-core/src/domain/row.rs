//! ObservedRow — one instrument's trading data for one date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLC observation for a single symbol on a single day.
///
/// Each price field is either a finite number or `None`. A field that was
/// absent in the snapshot and a field that failed numeric parsing land in the
/// same `None` state on purpose — downstream code never needs to tell them
/// apart, and `Option` keeps "missing" out of the numeric value space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedRow {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl ObservedRow {
    /// Returns true if the row carries everything a band classification
    /// needs: a high, a low, and a close.
    pub fn has_band_inputs(&self) -> bool {
        self.high.is_some() && self.low.is_some() && self.close.is_some()
    }
}
