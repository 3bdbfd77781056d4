//! Production ledger: per-phase monthly columns over the forecast horizon

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::config::{EngineConfig, ForecastSettings};
use crate::decline::DeclineParameters;
use crate::error::{ForecastError, Result};
use crate::forecast::{ForecastAssembler, ForecastResult};
use crate::grid::{ForecastCalendar, PeriodRange, TimeGrid};

/// Entry rate, exit rate and volume columns for one phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseColumns {
    pub entry_rate: Vec<f64>,
    pub exit_rate: Vec<f64>,
    pub volume: Vec<f64>,
}

impl PhaseColumns {
    fn zeros(len: usize) -> Self {
        Self {
            entry_rate: vec![0.0; len],
            exit_rate: vec![0.0; len],
            volume: vec![0.0; len],
        }
    }

    fn at(&self, period: usize) -> (f64, f64, f64) {
        (self.entry_rate[period], self.exit_rate[period], self.volume[period])
    }

    fn add(&mut self, period: usize, (entry, exit, volume): (f64, f64, f64)) {
        self.entry_rate[period] += entry;
        self.exit_rate[period] += exit;
        self.volume[period] += volume;
    }
}

/// One month of the ledger, flattened for CSV output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub period: usize,
    pub month: String,
    pub days_start: f64,
    pub days_end: f64,
    pub entry_gas_rate: f64,
    pub exit_gas_rate: f64,
    pub gas_volume: f64,
    pub entry_oil_rate: f64,
    pub exit_oil_rate: f64,
    pub oil_volume: f64,
    pub entry_ngl_rate: f64,
    pub exit_ngl_rate: f64,
    pub ngl_volume: f64,
    pub entry_water_rate: f64,
    pub exit_water_rate: f64,
    pub water_volume: f64,
}

/// Accumulates forecasts for every phase on a shared monthly grid
#[derive(Debug, Clone)]
pub struct ProductionLedger {
    calendar: ForecastCalendar,
    grid: TimeGrid,
    assembler: ForecastAssembler,
    columns: [PhaseColumns; 4],
}

impl ProductionLedger {
    /// Empty ledger spanning the settings' forecast duration
    pub fn new(settings: &ForecastSettings) -> Result<Self> {
        Self::from_parts(settings.engine_config()?, settings.calendar()?)
    }

    pub fn from_parts(config: EngineConfig, calendar: ForecastCalendar) -> Result<Self> {
        let grid = TimeGrid::from_config(calendar.duration(), &config)?;
        let len = grid.num_periods();
        Ok(Self {
            calendar,
            grid,
            assembler: ForecastAssembler::new(config)?,
            columns: std::array::from_fn(|_| PhaseColumns::zeros(len)),
        })
    }

    pub fn calendar(&self) -> &ForecastCalendar {
        &self.calendar
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn num_periods(&self) -> usize {
        self.grid.num_periods()
    }

    pub fn phase(&self, phase: Phase) -> &PhaseColumns {
        &self.columns[phase.index()]
    }

    /// Forecast `params` over `range` (whole horizon when `None`) and add it to `phase`
    pub fn generate_forecast(
        &mut self,
        phase: Phase,
        params: &DeclineParameters,
        range: Option<PeriodRange>,
    ) -> Result<ForecastResult> {
        let forecast = self.assembler.forecast(params, &self.grid, range)?;
        log::info!(
            "{} {} forecast: {} periods from {}, {:.2} total volume",
            phase,
            params.curve(),
            forecast.len(),
            forecast.first_period,
            forecast.summary().total_volume
        );
        self.add_forecast(phase, &forecast)?;
        Ok(forecast)
    }

    /// Add a forecast's rows into the phase columns for the periods it covers
    pub fn add_forecast(&mut self, phase: Phase, forecast: &ForecastResult) -> Result<()> {
        if let Some(range) = forecast.range() {
            self.check_range(range)?;
        }

        let columns = &mut self.columns[phase.index()];
        for row in &forecast.rows {
            columns.add(row.period, row.triple());
        }

        log::debug!("added {} rows to {} columns", forecast.len(), phase);
        Ok(())
    }

    /// Add `ratio` times the `base` phase columns into the `target` phase columns over `range`
    pub fn ratio_forecast(
        &mut self,
        target: Phase,
        base: Phase,
        ratio: f64,
        range: Option<PeriodRange>,
    ) -> Result<()> {
        if !ratio.is_finite() {
            return Err(ForecastError::domain(format!("ratio must be finite, got {}", ratio)));
        }
        let range = range.unwrap_or_else(|| self.grid.range());
        self.check_range(range)?;

        for period in range.start..=range.stop {
            let (entry, exit, volume) = self.columns[base.index()].at(period);
            self.columns[target.index()].add(period, (entry * ratio, exit * ratio, volume * ratio));
        }

        log::debug!(
            "ratio forecast {} = {} x {} over periods {}..={}",
            target,
            ratio,
            base,
            range.start,
            range.stop
        );
        Ok(())
    }

    /// Column by ledger name, e.g. `entry_oil_rate` or `gas_volume`
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        Phase::ALL.iter().find_map(|phase| {
            let columns = self.phase(*phase);
            if name == phase.entry_rate_column() {
                Some(columns.entry_rate.as_slice())
            } else if name == phase.exit_rate_column() {
                Some(columns.exit_rate.as_slice())
            } else if name == phase.volume_column() {
                Some(columns.volume.as_slice())
            } else {
                None
            }
        })
    }

    /// Per-month records across all phases
    pub fn rows(&self) -> Vec<LedgerRow> {
        let [gas, oil, ngl, water] = &self.columns;
        self.grid
            .periods()
            .enumerate()
            .map(|(k, (days_start, days_end))| LedgerRow {
                period: k,
                month: self
                    .calendar
                    .label(k)
                    .map(|d| d.format("%Y-%m").to_string())
                    .unwrap_or_default(),
                days_start,
                days_end,
                entry_gas_rate: gas.entry_rate[k],
                exit_gas_rate: gas.exit_rate[k],
                gas_volume: gas.volume[k],
                entry_oil_rate: oil.entry_rate[k],
                exit_oil_rate: oil.exit_rate[k],
                oil_volume: oil.volume[k],
                entry_ngl_rate: ngl.entry_rate[k],
                exit_ngl_rate: ngl.exit_rate[k],
                ngl_volume: ngl.volume[k],
                entry_water_rate: water.entry_rate[k],
                exit_water_rate: water.exit_rate[k],
                water_volume: water.volume[k],
            })
            .collect()
    }

    /// Fold another ledger on the same horizon into this one
    pub fn merge(&mut self, other: &ProductionLedger) -> Result<()> {
        if other.num_periods() != self.num_periods() || other.calendar != self.calendar {
            return Err(ForecastError::config(
                "cannot merge ledgers with different forecast horizons",
            ));
        }
        for phase in Phase::ALL {
            let theirs = other.phase(phase);
            let ours = &mut self.columns[phase.index()];
            for k in 0..self.grid.num_periods() {
                ours.add(k, theirs.at(k));
            }
        }
        Ok(())
    }

    fn check_range(&self, range: PeriodRange) -> Result<()> {
        if range.stop >= self.grid.num_periods() {
            return Err(ForecastError::config(format!(
                "periods {}..={} exceed the {}-month ledger",
                range.start,
                range.stop,
                self.grid.num_periods()
            )));
        }
        Ok(())
    }
}
