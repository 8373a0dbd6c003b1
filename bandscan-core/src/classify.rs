//! Band classification — where does a symbol's latest close sit relative to
//! the EMA band of its highs and lows?
//!
//! Pure, single-pass computation per request. The classifier never re-sorts:
//! it reads a `SeriesView`, whose ordering the table established at build
//! time, truncates it to the optional cutoff date, and smooths the high and
//! low columns independently with the same period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::PriceTable;
use crate::indicators::ema;

/// Three-way position of the current price relative to the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandStatus {
    Above,
    Below,
    Within,
}

/// One symbol's classification at the requested point in time.
///
/// Prices and band edges are rounded to 2 decimals for presentation; the
/// classification itself is decided on full-precision values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub symbol: String,
    pub current_price: f64,
    pub ema_high: f64,
    pub ema_low: f64,
    pub status: BandStatus,
    pub last_updated: NaiveDate,
}

/// Per-symbol classification failures. These surface as error markers in a
/// batch response; they never abort the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("No data found")]
    NoData,

    #[error("No data found for the specified date")]
    NoDataAtDate,
}

/// The classification rule, evaluated in order. Equality to either band
/// edge is `Within` — a deliberate tie-break, not an oversight.
pub fn band_status(current_price: f64, ema_high: f64, ema_low: f64) -> BandStatus {
    if current_price > ema_high {
        BandStatus::Above
    } else if current_price < ema_low {
        BandStatus::Below
    } else {
        BandStatus::Within
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify `symbol` against its EMA high/low band as of `cutoff` (or the
/// latest observation when no cutoff is given).
///
/// Rows with a missing high, low, or close are skipped before smoothing —
/// the EMA itself assumes a fully numeric sequence.
pub fn classify(
    table: &PriceTable,
    symbol: &str,
    period: usize,
    cutoff: Option<NaiveDate>,
) -> Result<Classification, ClassifyError> {
    let full = table.series(symbol);
    if full.is_empty() {
        return Err(ClassifyError::NoData);
    }

    let visible = match cutoff {
        Some(date) => full.up_to(date),
        None => full,
    };

    let points: Vec<(NaiveDate, f64, f64, f64)> = visible
        .rows()
        .iter()
        .filter_map(|r| Some((r.date, r.high?, r.low?, r.close?)))
        .collect();

    let Some(&(last_date, _, _, last_close)) = points.last() else {
        return Err(if cutoff.is_some() {
            ClassifyError::NoDataAtDate
        } else {
            ClassifyError::NoData
        });
    };

    let highs: Vec<f64> = points.iter().map(|&(_, high, _, _)| high).collect();
    let lows: Vec<f64> = points.iter().map(|&(_, _, low, _)| low).collect();

    let band_high = ema(&highs, period)
        .last()
        .copied()
        .ok_or(ClassifyError::NoData)?;
    let band_low = ema(&lows, period)
        .last()
        .copied()
        .ok_or(ClassifyError::NoData)?;

    Ok(Classification {
        symbol: symbol.to_string(),
        current_price: round2(last_close),
        ema_high: round2(band_high),
        ema_low: round2(band_low),
        status: band_status(last_close, band_high, band_low),
        last_updated: last_date,
    })
}
