//! Forecast requests loaded from CSV
//!
//! Columns: `WellID, Phase, CurveType, Qi, Di, De, Dt, Dte, B, Start, Stop`. `Di`/`Dt` are
//! nominal declines and `De`/`Dte` their secant counterparts; supply at most one of each pair.
//! Empty cells are treated as absent.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use crate::decline::{DeclineParameters, DeclineRate, DeclineType};
use crate::error::{ForecastError, Result};
use crate::grid::PeriodBound;
use crate::ledger::Phase;

/// One curve segment for one well and phase
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub well_id: String,
    pub phase: Phase,
    pub params: DeclineParameters,
    pub start: Option<PeriodBound>,
    pub stop: Option<PeriodBound>,
}

impl ForecastRequest {
    pub fn new(well_id: impl Into<String>, phase: Phase, params: DeclineParameters) -> Self {
        Self {
            well_id: well_id.into(),
            phase,
            params,
            start: None,
            stop: None,
        }
    }

    /// Restrict the segment to `start..=stop`
    pub fn between(mut self, start: Option<PeriodBound>, stop: Option<PeriodBound>) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }
}

/// Raw CSV row matching the request file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "WellID")]
    well_id: String,
    #[serde(rename = "Phase")]
    phase: String,
    #[serde(rename = "CurveType")]
    curve_type: String,
    #[serde(rename = "Qi")]
    qi: f64,
    #[serde(rename = "Di")]
    di: Option<f64>,
    #[serde(rename = "De")]
    de: Option<f64>,
    #[serde(rename = "Dt")]
    dt: Option<f64>,
    #[serde(rename = "Dte")]
    dte: Option<f64>,
    #[serde(rename = "B")]
    b: Option<f64>,
    #[serde(rename = "Start")]
    start: Option<String>,
    #[serde(rename = "Stop")]
    stop: Option<String>,
}

impl CsvRow {
    fn to_request(self) -> Result<ForecastRequest> {
        let phase: Phase = self.phase.parse()?;
        let curve: DeclineType = self.curve_type.parse()?;

        let mut params = DeclineParameters::new(curve, self.qi);
        if let Some(di) = pick_decline(&self.well_id, "Di", self.di, "De", self.de)? {
            params = params.with_initial_decline(di);
        }
        if let Some(dt) = pick_decline(&self.well_id, "Dt", self.dt, "Dte", self.dte)? {
            params = params.with_terminal_decline(dt);
        }
        if let Some(b) = self.b {
            params = params.with_b(b);
        }

        Ok(ForecastRequest {
            well_id: self.well_id,
            phase,
            params,
            start: parse_bound(self.start)?,
            stop: parse_bound(self.stop)?,
        })
    }
}

fn pick_decline(
    well_id: &str,
    nominal_name: &str,
    nominal: Option<f64>,
    secant_name: &str,
    secant: Option<f64>,
) -> Result<Option<DeclineRate>> {
    match (nominal, secant) {
        (Some(_), Some(_)) => Err(ForecastError::config(format!(
            "well {}: give either {} or {}, not both",
            well_id, nominal_name, secant_name
        ))),
        (Some(d), None) => Ok(Some(DeclineRate::Nominal(d))),
        (None, Some(d)) => Ok(Some(DeclineRate::Secant(d))),
        (None, None) => Ok(None),
    }
}

fn parse_bound(raw: Option<String>) -> Result<Option<PeriodBound>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<ForecastRequest>> {
    let reader = Reader::from_path(path)?;
    collect_requests(reader)
}

/// Load requests from any reader (e.g., string buffer, network stream)
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<Vec<ForecastRequest>> {
    collect_requests(Reader::from_reader(reader))
}

fn collect_requests<R: Read>(mut reader: Reader<R>) -> Result<Vec<ForecastRequest>> {
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    log::debug!("loaded {} forecast requests", requests.len());
    Ok(requests)
}
