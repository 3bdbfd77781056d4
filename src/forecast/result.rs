//! Forecast output structures

use serde::{Deserialize, Serialize};

use crate::grid::PeriodRange;

/// One period of forecast output
///
/// Entry and exit rates are samples of the rate law at the period boundaries; the volume is the
/// exact integral between them. They are different quantities and both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Absolute period index (0 = effective month)
    pub period: usize,
    pub days_start: f64,
    pub days_end: f64,
    pub entry_rate: f64,
    pub exit_rate: f64,
    pub volume: f64,
}

impl ForecastRow {
    /// The `(entry_rate, exit_rate, volume)` triple handed to the ledger
    pub fn triple(&self) -> (f64, f64, f64) {
        (self.entry_rate, self.exit_rate, self.volume)
    }
}

/// Dense forecast over a contiguous run of periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Absolute index of the first row's period
    pub first_period: usize,

    /// One row per period
    pub rows: Vec<ForecastRow>,
}

impl ForecastResult {
    pub fn new(first_period: usize) -> Self {
        Self {
            first_period,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: ForecastRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Absolute periods covered, `None` when empty
    pub fn range(&self) -> Option<PeriodRange> {
        let last = self.rows.last()?;
        Some(PeriodRange {
            start: self.first_period,
            stop: last.period,
        })
    }

    pub fn entry_rates(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.entry_rate).collect()
    }

    pub fn exit_rates(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.exit_rate).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.volume).collect()
    }

    /// Running total of period volumes
    pub fn cumulative_volumes(&self) -> Vec<f64> {
        self.rows
            .iter()
            .scan(0.0, |total, r| {
                *total += r.volume;
                Some(*total)
            })
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ForecastSummary {
        ForecastSummary {
            periods: self.rows.len(),
            first_period: self.first_period,
            initial_rate: self.rows.first().map(|r| r.entry_rate).unwrap_or(0.0),
            final_rate: self.rows.last().map(|r| r.exit_rate).unwrap_or(0.0),
            total_volume: self.rows.iter().map(|r| r.volume).sum(),
        }
    }
}

/// Summary statistics for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub periods: usize,
    pub first_period: usize,
    pub initial_rate: f64,
    pub final_rate: f64,
    pub total_volume: f64,
}
