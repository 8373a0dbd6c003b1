//! Domain types shared across the crate.

pub mod row;

pub use row::ObservedRow;
