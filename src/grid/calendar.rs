//! Calendar labels for forecast periods
//!
//! Period `k` is the calendar month `effective_month + k`. Start/stop bounds may be given as
//! period indices or as month labels and are resolved here against the effective month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use super::time_grid::PeriodRange;
use crate::error::{ForecastError, Result};

/// A start or stop bound for a forecast segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodBound {
    /// Zero-based period index
    Index(usize),
    /// Calendar month (day component ignored)
    Label(NaiveDate),
}

impl FromStr for PeriodBound {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Ok(PeriodBound::Index(index));
        }
        parse_month_label(s).map(PeriodBound::Label)
    }
}

impl fmt::Display for PeriodBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodBound::Index(index) => write!(f, "{}", index),
            PeriodBound::Label(date) => write!(f, "{}", date.format("%Y-%m")),
        }
    }
}

/// Parse "YYYY-MM" or "YYYY-MM-DD" into the first day of that month
pub fn parse_month_label(label: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(label, "%Y-%m-%d"))
        .map_err(|_| ForecastError::config(format!("unrecognised period label '{}'", label)))?;
    Ok(first_of_month(date))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Maps period indices to calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastCalendar {
    effective_month: NaiveDate,
    duration: u32,
}

impl ForecastCalendar {
    pub fn new(effective_date: NaiveDate, duration: u32) -> Result<Self> {
        if duration == 0 {
            return Err(ForecastError::config("forecast duration must be at least one month"));
        }
        Ok(Self {
            effective_month: first_of_month(effective_date),
            duration,
        })
    }

    /// Build from an effective-month label such as "2024-01"
    pub fn parse(effective_date: &str, duration: u32) -> Result<Self> {
        Self::new(parse_month_label(effective_date)?, duration)
    }

    pub fn effective_month(&self) -> NaiveDate {
        self.effective_month
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Calendar month of period `k`
    pub fn label(&self, period: usize) -> Option<NaiveDate> {
        if period >= self.duration as usize {
            return None;
        }
        self.effective_month
            .checked_add_months(Months::new(period as u32))
    }

    /// Resolve a bound to a period index inside the forecast
    pub fn resolve(&self, bound: PeriodBound) -> Result<usize> {
        let index = match bound {
            PeriodBound::Index(index) => index as i64,
            PeriodBound::Label(date) => {
                let years = date.year() as i64 - self.effective_month.year() as i64;
                let months = date.month() as i64 - self.effective_month.month() as i64;
                years * 12 + months
            }
        };

        if index < 0 || index >= self.duration as i64 {
            return Err(ForecastError::config(format!(
                "period {} lies outside the {}-month forecast starting {}",
                bound,
                self.duration,
                self.effective_month.format("%Y-%m")
            )));
        }
        Ok(index as usize)
    }

    /// Resolve optional bounds; omitted bounds default to the first and last periods
    pub fn resolve_range(
        &self,
        start: Option<PeriodBound>,
        stop: Option<PeriodBound>,
    ) -> Result<PeriodRange> {
        let start = match start {
            Some(bound) => self.resolve(bound)?,
            None => 0,
        };
        let stop = match stop {
            Some(bound) => self.resolve(bound)?,
            None => self.duration as usize - 1,
        };
        PeriodRange::new(start, stop)
    }
}
