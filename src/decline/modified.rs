//! Modified hyperbolic decline
//!
//! A hyperbolic leg runs until its instantaneous nominal decline falls to the terminal decline
//! `Dt`; from that switch point on, production follows an exponential leg at `Dt` starting from
//! the switch rate. The two legs join continuously:
//!
//! ```text
//! t_switch = (Di/Dt - 1) / (b*Di) * c
//! q_switch = qi * (1 + b*Di*t_switch/c)^(-1/b)
//! ```
//!
//! The period that straddles `t_switch` integrates the hyperbolic leg up to the switch and the
//! exponential leg after it; periods fully on one side use that leg alone.

use serde::{Deserialize, Serialize};

use super::{DeclineCurve, DeclineRate, DeclineType, Exponential, Hyperbolic};
use crate::config::EngineConfig;
use crate::error::{ForecastError, Result};
use crate::grid::TimeGrid;

/// Time offset (days) and rate at which the terminal exponential leg takes over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwitchPoint {
    pub t_switch: f64,
    pub q_switch: f64,
}

impl SwitchPoint {
    /// Switch point of a hyperbolic leg against nominal terminal decline `dt`
    fn for_leg(leg: &Hyperbolic, dt: f64, days_in_year: f64) -> Result<Self> {
        let (di, b) = (leg.di(), leg.b());

        if b <= 0.0 {
            return Err(ForecastError::domain(
                "modified hyperbolic needs b > 0; with b = 0 the decline never reaches Dt",
            ));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ForecastError::domain(format!(
                "terminal decline must be positive, got {}",
                dt
            )));
        }
        if dt >= di {
            return Err(ForecastError::domain(format!(
                "terminal decline {} must be below initial decline {}; the switch never occurs",
                dt, di
            )));
        }

        let t_switch = (di / dt - 1.0) / (b * di) * days_in_year;
        let q_switch = leg.rate(t_switch);
        if !t_switch.is_finite() || !q_switch.is_finite() {
            return Err(ForecastError::domain(format!(
                "switch point is not finite (t = {}, q = {})",
                t_switch, q_switch
            )));
        }

        Ok(Self { t_switch, q_switch })
    }

    /// The single grid period whose interior strictly contains the switch
    ///
    /// `None` when the switch lands exactly on a boundary or outside the grid.
    pub fn period_in(&self, grid: &TimeGrid) -> Option<usize> {
        grid.periods()
            .position(|(t0, t1)| t0 < self.t_switch && self.t_switch < t1)
            .map(|k| grid.first_period() + k)
    }
}

/// Compute the switch point, converting secant inputs first
///
/// A secant `di` converts with the hyperbolic family at `b`; a secant `dt` converts with the
/// exponential family.
pub fn terminal_switch(
    qi: f64,
    di: DeclineRate,
    b: f64,
    dt: DeclineRate,
    config: &EngineConfig,
) -> Result<SwitchPoint> {
    let di = di.to_nominal(DeclineType::Hyperbolic, Some(b))?;
    let dt = dt.to_nominal(DeclineType::Exponential, None)?;
    let leg = Hyperbolic::new(qi, di, b, config)?;
    SwitchPoint::for_leg(&leg, dt, config.days_in_year)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifiedHyperbolic {
    hyperbolic: Hyperbolic,
    terminal: Exponential,
    switch: SwitchPoint,
}

impl ModifiedHyperbolic {
    /// All declines nominal: `di` initial, `dt` terminal
    pub fn new(qi: f64, di: f64, b: f64, dt: f64, config: &EngineConfig) -> Result<Self> {
        let hyperbolic = Hyperbolic::new(qi, di, b, config)?;
        let switch = SwitchPoint::for_leg(&hyperbolic, dt, config.days_in_year)?;
        let terminal = Exponential::new(switch.q_switch, dt, config)?;

        log::debug!(
            "modified hyperbolic qi={} Di={} b={} Dt={}: switch at t={:.4} d, q={:.4}",
            qi,
            di,
            b,
            dt,
            switch.t_switch,
            switch.q_switch
        );

        Ok(Self {
            hyperbolic,
            terminal,
            switch,
        })
    }

    pub fn switch(&self) -> SwitchPoint {
        self.switch
    }

    pub fn hyperbolic(&self) -> &Hyperbolic {
        &self.hyperbolic
    }

    /// Exponential leg, with time re-based at the switch
    pub fn terminal(&self) -> &Exponential {
        &self.terminal
    }
}

impl DeclineCurve for ModifiedHyperbolic {
    fn rate(&self, t: f64) -> f64 {
        let ts = self.switch.t_switch;
        if t <= ts {
            self.hyperbolic.rate(t)
        } else {
            self.terminal.rate(t - ts)
        }
    }

    fn volume(&self, t0: f64, t1: f64) -> f64 {
        let ts = self.switch.t_switch;
        if t1 <= ts {
            self.hyperbolic.volume(t0, t1)
        } else if t0 >= ts {
            self.terminal.volume(t0 - ts, t1 - ts)
        } else {
            // switch period: blend both legs through q_switch
            self.hyperbolic.volume(t0, ts) + self.terminal.volume(0.0, t1 - ts)
        }
    }
}
