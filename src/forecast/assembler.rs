//! Drives a curve model across a time grid

use super::result::{ForecastResult, ForecastRow};
use crate::config::EngineConfig;
use crate::decline::{CurveModel, DeclineCurve, DeclineParameters};
use crate::error::{ForecastError, Result};
use crate::grid::{PeriodRange, TimeGrid};

/// Main forecast engine
///
/// Stateless apart from the day-count constants it hands to every model it builds.
#[derive(Debug, Clone, Copy)]
pub struct ForecastAssembler {
    config: EngineConfig,
}

impl ForecastAssembler {
    /// Create an assembler with validated constants
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate `model` at every period of `grid`
    ///
    /// Fails with `DomainError` on the first period whose rate or volume is not finite.
    pub fn assemble<C: DeclineCurve + ?Sized>(model: &C, grid: &TimeGrid) -> Result<ForecastResult> {
        let mut result = ForecastResult::new(grid.first_period());

        for (k, (t0, t1)) in grid.periods().enumerate() {
            let row = ForecastRow {
                period: grid.first_period() + k,
                days_start: t0,
                days_end: t1,
                entry_rate: model.rate(t0),
                exit_rate: model.rate(t1),
                volume: model.volume(t0, t1),
            };

            if !(row.entry_rate.is_finite() && row.exit_rate.is_finite() && row.volume.is_finite()) {
                log::warn!("non-finite forecast at period {}: {:?}", row.period, row);
                return Err(ForecastError::domain(format!(
                    "forecast is not finite in period {} (entry {}, exit {}, volume {})",
                    row.period, row.entry_rate, row.exit_rate, row.volume
                )));
            }

            result.add_row(row);
        }

        Ok(result)
    }

    /// Evaluate only the periods in `range`
    ///
    /// Slices the grid, then assembles; rows equal the matching rows of a full-grid assembly.
    pub fn assemble_range<C: DeclineCurve + ?Sized>(
        model: &C,
        grid: &TimeGrid,
        range: PeriodRange,
    ) -> Result<ForecastResult> {
        let slice = grid.slice(range)?;
        Self::assemble(model, &slice)
    }

    /// Build the curve for `params` and assemble it, optionally over a sub-range
    pub fn forecast(
        &self,
        params: &DeclineParameters,
        grid: &TimeGrid,
        range: Option<PeriodRange>,
    ) -> Result<ForecastResult> {
        let model = CurveModel::from_parameters(params, &self.config)?;
        match range {
            Some(range) => Self::assemble_range(&model, grid, range),
            None => Self::assemble(&model, grid),
        }
    }
}
