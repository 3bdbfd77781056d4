//! Decline Forecast - Arps decline-curve forecasting engine
//!
//! This library provides:
//! - Exponential, harmonic, hyperbolic, flat and modified hyperbolic rate laws
//! - Secant/nominal decline conversions per curve family
//! - Monthly forecast assembly (entry rate, exit rate, volume per period)
//! - A per-phase production ledger that accumulates forecast segments
//! - Parallel batch forecasting from CSV request files

pub mod error;
pub mod config;
pub mod grid;
pub mod decline;
pub mod forecast;
pub mod ledger;
pub mod batch;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use config::{EngineConfig, ForecastSettings};
pub use grid::{ForecastCalendar, PeriodBound, PeriodRange, TimeGrid};
pub use decline::{
    CurveModel, DeclineCurve, DeclineParameters, DeclineRate, DeclineType, SwitchPoint,
    nominal_to_secant, secant_to_nominal, terminal_switch,
};
pub use forecast::{ForecastAssembler, ForecastResult, ForecastRow, ForecastSummary};
pub use ledger::{Phase, ProductionLedger};
pub use batch::{BatchRunner, ForecastRequest};
