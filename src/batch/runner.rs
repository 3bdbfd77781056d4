//! Batch runner for many wells
//!
//! Builds the grid and calendar once, then evaluates every request in parallel. Each request
//! is independent; a failure is reported against its well and does not stop the batch.

use rayon::prelude::*;

use super::ForecastRequest;
use crate::config::{EngineConfig, ForecastSettings};
use crate::error::Result;
use crate::forecast::{ForecastAssembler, ForecastResult};
use crate::grid::{ForecastCalendar, TimeGrid};
use crate::ledger::{Phase, ProductionLedger};

/// Result of one request
#[derive(Debug)]
pub struct BatchOutcome {
    pub well_id: String,
    pub phase: Phase,
    pub forecast: Result<ForecastResult>,
}

/// Pre-built grid and calendar shared by every request in a batch
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new(&ForecastSettings::load()?)?;
/// let requests = load_requests("requests.csv")?;
/// let outcomes = runner.run(&requests);
/// let ledger = runner.aggregate(&outcomes)?;
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: EngineConfig,
    calendar: ForecastCalendar,
    grid: TimeGrid,
    assembler: ForecastAssembler,
}

impl BatchRunner {
    pub fn new(settings: &ForecastSettings) -> Result<Self> {
        let config = settings.engine_config()?;
        let calendar = settings.calendar()?;
        Ok(Self {
            config,
            calendar,
            grid: TimeGrid::from_config(calendar.duration(), &config)?,
            assembler: ForecastAssembler::new(config)?,
        })
    }

    pub fn calendar(&self) -> &ForecastCalendar {
        &self.calendar
    }

    /// Evaluate a single request
    pub fn run_one(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let range = self.calendar.resolve_range(request.start, request.stop)?;
        self.assembler.forecast(&request.params, &self.grid, Some(range))
    }

    /// Evaluate all requests in parallel, preserving input order
    pub fn run(&self, requests: &[ForecastRequest]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = requests
            .par_iter()
            .map(|request| BatchOutcome {
                well_id: request.well_id.clone(),
                phase: request.phase,
                forecast: self.run_one(request),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.forecast.is_err()).count();
        log::info!(
            "batch complete: {} requests, {} failed",
            outcomes.len(),
            failed
        );
        outcomes
    }

    /// Sum successful outcomes per phase into one ledger; failures are logged and skipped
    pub fn aggregate(&self, outcomes: &[BatchOutcome]) -> Result<ProductionLedger> {
        let mut ledger = ProductionLedger::from_parts(self.config, self.calendar)?;
        for outcome in outcomes {
            match &outcome.forecast {
                Ok(forecast) => ledger.add_forecast(outcome.phase, forecast)?,
                Err(err) => log::warn!("skipping well {} {}: {}", outcome.well_id, outcome.phase, err),
            }
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decline::{DeclineParameters, DeclineRate};
    use crate::error::ForecastError;
    use crate::grid::PeriodBound;
    use approx::assert_relative_eq;

    fn runner() -> BatchRunner {
        let settings =
            ForecastSettings::from_json(r#"{"effective_date": "2024-01", "forecast_duration": 120}"#)
                .unwrap();
        BatchRunner::new(&settings).unwrap()
    }

    fn requests() -> Vec<ForecastRequest> {
        vec![
            ForecastRequest::new(
                "A-1",
                Phase::Oil,
                DeclineParameters::hyperbolic(600.0, DeclineRate::Secant(0.65), 1.2),
            ),
            ForecastRequest::new(
                "A-2",
                Phase::Oil,
                DeclineParameters::exponential(250.0, DeclineRate::Nominal(0.2)),
            )
            .between(Some("2025-01".parse().unwrap()), None),
            ForecastRequest::new(
                "A-2",
                Phase::Gas,
                DeclineParameters::modified_hyperbolic(
                    3000.0,
                    DeclineRate::Secant(0.7),
                    1.5,
                    DeclineRate::Secant(0.07),
                ),
            ),
            // Dt above Di never switches
            ForecastRequest::new(
                "B-1",
                Phase::Gas,
                DeclineParameters::modified_hyperbolic(
                    100.0,
                    DeclineRate::Nominal(0.05),
                    1.0,
                    DeclineRate::Nominal(0.2),
                ),
            ),
        ]
    }

    #[test]
    fn test_run_preserves_order_and_isolates_failures() {
        let runner = runner();
        let outcomes = runner.run(&requests());

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[1].well_id, "A-2");
        assert_eq!(outcomes[1].phase, Phase::Oil);
        assert!(outcomes[..3].iter().all(|o| o.forecast.is_ok()));
        assert!(matches!(outcomes[3].forecast, Err(ForecastError::DomainError(_))));

        let a2 = outcomes[1].forecast.as_ref().unwrap();
        assert_eq!(a2.first_period, 12);
        assert_eq!(a2.len(), 108);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = runner();
        let requests = requests();
        let outcomes = runner.run(&requests);

        for (request, outcome) in requests.iter().zip(&outcomes).take(3) {
            let sequential = runner.run_one(request).unwrap();
            assert_eq!(outcome.forecast.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_aggregate_sums_per_phase() {
        let runner = runner();
        let outcomes = runner.run(&requests());
        let ledger = runner.aggregate(&outcomes).unwrap();

        let oil_total: f64 = ledger.column("oil_volume").unwrap().iter().sum();
        let expected: f64 = outcomes[..2]
            .iter()
            .map(|o| o.forecast.as_ref().unwrap().summary().total_volume)
            .sum();
        assert_relative_eq!(oil_total, expected, max_relative = 1e-12);

        let gas = ledger.column("entry_gas_rate").unwrap();
        assert_relative_eq!(gas[0], 3000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_out_of_horizon_bound_fails_request() {
        let runner = runner();
        let request = ForecastRequest::new("C-1", Phase::Water, DeclineParameters::flat(10.0))
            .between(Some(PeriodBound::Index(200)), None);
        assert!(matches!(
            runner.run_one(&request),
            Err(ForecastError::InvalidConfiguration(_))
        ));
    }
}
