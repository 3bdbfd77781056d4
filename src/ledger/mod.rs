//! Monthly production ledger
//!
//! Holds entry rate, exit rate and volume columns for every phase over the full forecast.
//! Forecast segments and ratio forecasts add into these columns, so overlapping segments
//! accumulate rather than overwrite.

mod phase;
mod production;

pub use phase::Phase;
pub use production::{LedgerRow, PhaseColumns, ProductionLedger};
