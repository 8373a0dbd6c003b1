//! Bandscan Core — EMA trading-range scanner.
//!
//! This crate contains the heart of the scanner:
//! - Domain types (observed per-day rows, the shared price table)
//! - Snapshot ingestion (per-date CSV files, date derived from the filename)
//! - EMA smoothing over high/low columns
//! - Three-way band classification (above / below / within)
//! - Batch scan façade consumed by the HTTP layer
//! - Chunked close-history export for the static front-end
//!
//! The table is built exactly once at startup and never mutated afterward;
//! every query reads a borrowed, date-ascending view of it.

pub mod classify;
pub mod data;
pub mod domain;
pub mod export;
pub mod facade;
pub mod indicators;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the server shares across requests is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::ObservedRow>();
        require_sync::<domain::ObservedRow>();
        require_send::<data::PriceTable>();
        require_sync::<data::PriceTable>();
        require_send::<classify::Classification>();
        require_sync::<classify::Classification>();
        require_send::<facade::ScanRequest>();
        require_sync::<facade::ScanRequest>();
        require_send::<facade::ScanResponse>();
        require_sync::<facade::ScanResponse>();
    }
}
