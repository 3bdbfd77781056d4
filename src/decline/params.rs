//! Decline parameter value objects

use serde::{Deserialize, Serialize};

use super::conversions::secant_to_nominal;
use super::{ensure_finite, DeclineType};
use crate::error::{ForecastError, Result};

/// A decline rate tagged with its representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineRate {
    /// Nominal annual fraction, usable directly in the rate laws
    Nominal(f64),
    /// Secant-effective annual fraction, converted per curve family
    Secant(f64),
}

impl DeclineRate {
    /// Raw value regardless of representation
    pub fn value(&self) -> f64 {
        match self {
            DeclineRate::Nominal(v) | DeclineRate::Secant(v) => *v,
        }
    }

    /// Nominal value, converting secant input with the given curve family
    pub fn to_nominal(&self, family: DeclineType, b: Option<f64>) -> Result<f64> {
        match *self {
            DeclineRate::Nominal(di) => ensure_finite("nominal decline", di),
            DeclineRate::Secant(de) => secant_to_nominal(de, family, b),
        }
    }
}

/// Inputs for one decline curve
///
/// Immutable once built: [`DeclineParameters::to_nominal`] returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeclineParameters {
    curve: DeclineType,
    qi: f64,
    initial_decline: Option<DeclineRate>,
    terminal_decline: Option<DeclineRate>,
    b: Option<f64>,
}

impl DeclineParameters {
    /// Bare parameters for a curve; add declines and b with the `with_*` builders
    pub fn new(curve: DeclineType, qi: f64) -> Self {
        Self {
            curve,
            qi,
            initial_decline: None,
            terminal_decline: None,
            b: None,
        }
    }

    pub fn exponential(qi: f64, di: DeclineRate) -> Self {
        Self::new(DeclineType::Exponential, qi).with_initial_decline(di)
    }

    pub fn harmonic(qi: f64, di: DeclineRate) -> Self {
        Self::new(DeclineType::Harmonic, qi).with_initial_decline(di)
    }

    pub fn hyperbolic(qi: f64, di: DeclineRate, b: f64) -> Self {
        Self::new(DeclineType::Hyperbolic, qi)
            .with_initial_decline(di)
            .with_b(b)
    }

    pub fn flat(qi: f64) -> Self {
        Self::new(DeclineType::Flat, qi)
    }

    pub fn modified_hyperbolic(qi: f64, di: DeclineRate, b: f64, dt: DeclineRate) -> Self {
        Self::new(DeclineType::ModifiedHyperbolic, qi)
            .with_initial_decline(di)
            .with_b(b)
            .with_terminal_decline(dt)
    }

    pub fn with_initial_decline(mut self, di: DeclineRate) -> Self {
        self.initial_decline = Some(di);
        self
    }

    pub fn with_terminal_decline(mut self, dt: DeclineRate) -> Self {
        self.terminal_decline = Some(dt);
        self
    }

    pub fn with_b(mut self, b: f64) -> Self {
        self.b = Some(b);
        self
    }

    pub fn curve(&self) -> DeclineType {
        self.curve
    }

    pub fn qi(&self) -> f64 {
        self.qi
    }

    pub fn initial_decline(&self) -> Option<DeclineRate> {
        self.initial_decline
    }

    pub fn terminal_decline(&self) -> Option<DeclineRate> {
        self.terminal_decline
    }

    pub fn b(&self) -> Option<f64> {
        self.b
    }

    fn missing(&self, parameter: &'static str) -> ForecastError {
        ForecastError::MissingParameter {
            parameter,
            curve: self.curve,
        }
    }

    /// Finite qi, and a finite non-negative b when the curve uses one
    pub fn require_qi(&self) -> Result<f64> {
        ensure_finite("qi", self.qi)
    }

    pub fn require_b(&self) -> Result<f64> {
        let b = self.b.ok_or_else(|| self.missing("b"))?;
        let b = ensure_finite("b", b)?;
        if b < 0.0 {
            return Err(ForecastError::domain(format!("b-factor must be >= 0, got {}", b)));
        }
        Ok(b)
    }

    /// Nominal Di, converted with this curve's own family
    pub fn nominal_initial_decline(&self) -> Result<f64> {
        let di = self.initial_decline.ok_or_else(|| self.missing("Di"))?;
        let b = if self.curve.requires_b() {
            Some(self.require_b()?)
        } else {
            None
        };
        di.to_nominal(self.curve, b)
    }

    /// Nominal Dt; terminal declines always convert with the exponential family
    pub fn nominal_terminal_decline(&self) -> Result<f64> {
        let dt = self.terminal_decline.ok_or_else(|| self.missing("Dt"))?;
        dt.to_nominal(DeclineType::Exponential, None)
    }

    /// Check every parameter the curve depends on is present and finite
    pub fn validate(&self) -> Result<()> {
        self.require_qi()?;
        match self.curve {
            DeclineType::Flat => {}
            DeclineType::Exponential | DeclineType::Harmonic => {
                self.nominal_initial_decline()?;
            }
            DeclineType::Hyperbolic => {
                self.require_b()?;
                self.nominal_initial_decline()?;
            }
            DeclineType::ModifiedHyperbolic => {
                self.require_b()?;
                self.nominal_initial_decline()?;
                self.nominal_terminal_decline()?;
            }
        }
        Ok(())
    }

    /// Equivalent parameters with every decline in nominal form
    pub fn to_nominal(&self) -> Result<Self> {
        self.validate()?;
        let initial_decline = match self.initial_decline {
            Some(_) if self.curve != DeclineType::Flat => {
                Some(DeclineRate::Nominal(self.nominal_initial_decline()?))
            }
            other => other,
        };
        let terminal_decline = match self.terminal_decline {
            Some(_) => Some(DeclineRate::Nominal(self.nominal_terminal_decline()?)),
            None => None,
        };
        Ok(Self {
            initial_decline,
            terminal_decline,
            ..*self
        })
    }
}
