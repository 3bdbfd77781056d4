//! Day-count constants and forecast settings
//!
//! The constants are passed explicitly into every curve model. Nothing in the engine reads
//! process-wide state, so forecasts under different unit conventions can run side by side.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::grid::{ForecastCalendar, TimeGrid};

/// Default path to the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Default days per year (Julian year)
pub const DEFAULT_DAYS_IN_YEAR: f64 = 365.25;

/// Default days per month (Julian year / 12)
pub const DEFAULT_DAYS_IN_MONTH: f64 = 30.4375;

/// Read-only day-count constants used by the decline formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scale factor converting annual nominal declines to day offsets
    pub days_in_year: f64,

    /// Length of one grid period, also the flat-curve monthly volume convention
    pub days_in_month: f64,
}

impl EngineConfig {
    /// Create a validated configuration
    pub fn new(days_in_year: f64, days_in_month: f64) -> Result<Self> {
        let config = Self {
            days_in_year,
            days_in_month,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check both constants fall within calendar bounds
    pub fn validate(&self) -> Result<()> {
        if !self.days_in_year.is_finite() || !(365.0..=366.0).contains(&self.days_in_year) {
            return Err(ForecastError::config(format!(
                "days_in_year must lie in [365, 366], got {}",
                self.days_in_year
            )));
        }
        if !self.days_in_month.is_finite() || !(26.0..=31.0).contains(&self.days_in_month) {
            return Err(ForecastError::config(format!(
                "days_in_month must lie in [26, 31], got {}",
                self.days_in_month
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            days_in_year: DEFAULT_DAYS_IN_YEAR,
            days_in_month: DEFAULT_DAYS_IN_MONTH,
        }
    }
}

fn default_days_in_year() -> f64 {
    DEFAULT_DAYS_IN_YEAR
}

fn default_days_in_month() -> f64 {
    DEFAULT_DAYS_IN_MONTH
}

/// Forecast settings as stored in `settings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// First forecast month, formatted "YYYY-MM"
    pub effective_date: String,

    /// Number of monthly periods
    pub forecast_duration: u32,

    #[serde(default = "default_days_in_year")]
    pub days_in_year: f64,

    #[serde(default = "default_days_in_month")]
    pub days_in_month: f64,
}

impl ForecastSettings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::from_path(Path::new(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let settings: Self = serde_json::from_reader(BufReader::new(file))?;
        settings.engine_config()?;
        log::debug!(
            "loaded settings from {}: {} months from {}",
            path.display(),
            settings.forecast_duration,
            settings.effective_date
        );
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.engine_config()?;
        Ok(settings)
    }

    /// Validated day-count constants
    pub fn engine_config(&self) -> Result<EngineConfig> {
        EngineConfig::new(self.days_in_year, self.days_in_month)
    }

    /// Calendar anchoring period labels to the effective month
    pub fn calendar(&self) -> Result<ForecastCalendar> {
        ForecastCalendar::parse(&self.effective_date, self.forecast_duration)
    }

    /// Full-length time grid for these settings
    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::from_config(self.forecast_duration, &self.engine_config()?)
    }
}
