//! Batch forecasting from request files

mod request;
mod runner;

pub use request::{load_requests, load_requests_from_reader, ForecastRequest};
pub use runner::{BatchOutcome, BatchRunner};
