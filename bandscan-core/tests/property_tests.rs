//! Property tests for scanner invariants.
//!
//! Uses proptest to verify:
//! 1. EMA shape — output length equals input length, first output equals
//!    first input, single-element identity for every period
//! 2. EMA bounds on monotone input — never overtakes the latest value,
//!    never falls below the first
//! 3. Classification totality — exactly one status for any inputs, and
//!    band-edge ties always land Within
//! 4. Cutoff coherence — a cutoff on the last observed date is the same
//!    scan as no cutoff at all

use chrono::NaiveDate;
use proptest::prelude::*;

use bandscan_core::classify::{band_status, classify, BandStatus};
use bandscan_core::data::PriceTable;
use bandscan_core::domain::ObservedRow;
use bandscan_core::indicators::ema;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_period() -> impl Strategy<Value = usize> {
    1..=120_usize
}

fn arb_prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 1..60)
}

/// Daily rows for one symbol on consecutive dates, highs above lows.
fn arb_series() -> impl Strategy<Value = Vec<ObservedRow>> {
    prop::collection::vec((arb_price(), 0.01..50.0_f64, 0.0..1.0_f64), 1..40).prop_map(|days| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        days.iter()
            .enumerate()
            .map(|(i, &(low, span, pos))| {
                let high = low + span;
                let close = low + span * pos;
                ObservedRow {
                    symbol: "PROP".into(),
                    date: start + chrono::Duration::days(i as i64),
                    open: Some(close),
                    high: Some(high),
                    low: Some(low),
                    close: Some(close),
                }
            })
            .collect()
    })
}

// ── 1. EMA shape ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_output_length_equals_input_length(values in arb_prices(), period in arb_period()) {
        prop_assert_eq!(ema(&values, period).len(), values.len());
    }

    #[test]
    fn ema_first_output_equals_first_input(values in arb_prices(), period in arb_period()) {
        prop_assert_eq!(ema(&values, period)[0], values[0]);
    }

    #[test]
    fn ema_of_singleton_is_identity(value in arb_price(), period in arb_period()) {
        prop_assert_eq!(ema(&[value], period), vec![value]);
    }
}

// ── 2. EMA bounds ────────────────────────────────────────────────────

proptest! {
    /// On a strictly increasing series, the EMA at every point stays
    /// between the first value and the latest value seen so far.
    #[test]
    fn ema_on_increasing_series_is_bounded(
        start in arb_price(),
        steps in prop::collection::vec(0.01..10.0_f64, 1..50),
        period in arb_period(),
    ) {
        let mut values = vec![start];
        for step in steps {
            values.push(values.last().copied().unwrap_or(start) + step);
        }

        let smoothed = ema(&values, period);
        for (i, &s) in smoothed.iter().enumerate() {
            prop_assert!(s <= values[i] + 1e-9);
            prop_assert!(s >= values[0] - 1e-9);
        }
    }
}

// ── 3. Classification totality ───────────────────────────────────────

proptest! {
    /// For any numeric inputs, exactly one of the three statuses comes out.
    #[test]
    fn band_status_is_total_and_exclusive(
        price in arb_price(),
        a in arb_price(),
        b in arb_price(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let status = band_status(price, high, low);

        let expected = if price > high {
            BandStatus::Above
        } else if price < low {
            BandStatus::Below
        } else {
            BandStatus::Within
        };
        prop_assert_eq!(status, expected);
    }

    /// Equality to either band edge always classifies Within.
    #[test]
    fn band_edge_ties_are_within(a in arb_price(), b in arb_price()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert_eq!(band_status(high, high, low), BandStatus::Within);
        prop_assert_eq!(band_status(low, high, low), BandStatus::Within);
    }
}

// ── 4. Cutoff coherence ──────────────────────────────────────────────

proptest! {
    /// A cutoff equal to the last available date yields the same result
    /// as omitting the cutoff entirely.
    #[test]
    fn cutoff_on_last_date_matches_no_cutoff(rows in arb_series(), period in arb_period()) {
        let last_date = rows.last().map(|r| r.date);
        let table = PriceTable::build(rows);

        let without = classify(&table, "PROP", period, None);
        let with_cutoff = classify(&table, "PROP", period, last_date);
        prop_assert_eq!(without, with_cutoff);
    }

    /// A cutoff strictly before every observation is a per-symbol error,
    /// never a panic.
    #[test]
    fn cutoff_before_history_is_an_error(rows in arb_series(), period in arb_period()) {
        let table = PriceTable::build(rows);
        let ancient = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        prop_assert!(classify(&table, "PROP", period, Some(ancient)).is_err());
    }
}
