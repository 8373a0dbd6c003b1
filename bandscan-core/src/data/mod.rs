//! Snapshot ingestion and the shared price table.

pub mod snapshot;
pub mod table;

pub use snapshot::{clean_numeric, date_from_stem, load_dir, read_snapshot, LoadError};
pub use table::{PriceTable, SeriesView};
