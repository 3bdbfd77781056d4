//! Forecast assembly over a monthly time grid

mod assembler;
mod result;

pub use assembler::ForecastAssembler;
pub use result::{ForecastResult, ForecastRow, ForecastSummary};
