//! Discretized day-offset grid shared by every curve evaluation

use crate::config::EngineConfig;
use crate::error::{ForecastError, Result};

/// Inclusive range of period indices `[start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: usize,
    pub stop: usize,
}

impl PeriodRange {
    /// Create a range, rejecting `start > stop`
    pub fn new(start: usize, stop: usize) -> Result<Self> {
        if start > stop {
            return Err(ForecastError::config(format!(
                "period range start {} is after stop {}",
                start, stop
            )));
        }
        Ok(Self { start, stop })
    }

    /// Range covering every period of an `n`-period forecast
    pub fn full(num_periods: usize) -> Self {
        Self {
            start: 0,
            stop: num_periods.saturating_sub(1),
        }
    }

    /// Number of periods in the range
    pub fn len(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Always false: an inclusive range holds at least one period
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, period: usize) -> bool {
        (self.start..=self.stop).contains(&period)
    }
}

/// Ordered day offsets `t_k = k * days_in_month`
///
/// A grid built with [`TimeGrid::new`] starts at offset 0 and covers periods `0..N`. A grid
/// produced by [`TimeGrid::slice`] keeps the absolute offsets of its parent, so evaluating a
/// curve on a slice is bit-identical to evaluating it on the full grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    offsets: Vec<f64>,
    first_period: usize,
}

impl TimeGrid {
    /// Build an `months`-period grid with the given period length in days
    pub fn new(months: u32, days_in_month: f64) -> Result<Self> {
        if months == 0 {
            return Err(ForecastError::config("forecast duration must be at least one month"));
        }
        if !days_in_month.is_finite() || days_in_month <= 0.0 {
            return Err(ForecastError::config(format!(
                "days_in_month must be positive, got {}",
                days_in_month
            )));
        }

        let offsets = (0..=months).map(|k| k as f64 * days_in_month).collect();
        Ok(Self {
            offsets,
            first_period: 0,
        })
    }

    /// Build a grid from validated engine constants
    pub fn from_config(months: u32, config: &EngineConfig) -> Result<Self> {
        Self::new(months, config.days_in_month)
    }

    /// All `N + 1` boundary offsets
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Number of periods `N`
    pub fn num_periods(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Absolute index of this grid's first period
    pub fn first_period(&self) -> usize {
        self.first_period
    }

    /// Absolute index range covered by this grid
    pub fn range(&self) -> PeriodRange {
        PeriodRange {
            start: self.first_period,
            stop: self.first_period + self.num_periods() - 1,
        }
    }

    /// `(entry, exit)` offset pairs, one per period
    pub fn periods(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.offsets.windows(2).map(|w| (w[0], w[1]))
    }

    /// Restrict the grid to an absolute period range
    pub fn slice(&self, range: PeriodRange) -> Result<TimeGrid> {
        let own = self.range();
        if range.start < own.start || range.stop > own.stop {
            return Err(ForecastError::config(format!(
                "periods {}..={} fall outside grid periods {}..={}",
                range.start, range.stop, own.start, own.stop
            )));
        }

        let lo = range.start - self.first_period;
        let hi = range.stop - self.first_period + 1;
        Ok(TimeGrid {
            offsets: self.offsets[lo..=hi].to_vec(),
            first_period: range.start,
        })
    }
}
