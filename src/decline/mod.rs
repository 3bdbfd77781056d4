//! Arps decline-curve models
//!
//! Each model is a pure function of its parameters exposing two capabilities through
//! [`DeclineCurve`]:
//! - `rate(t)`: instantaneous rate at day offset `t`
//! - `volume(t0, t1)`: exact volume produced between two day offsets
//!
//! Declines are nominal annual fractions; time offsets are days. The day-to-year scale comes
//! from [`EngineConfig`](crate::config::EngineConfig), injected at construction.
//!
//! # Example
//!
//! ```rust,ignore
//! use decline_forecast::{CurveModel, DeclineCurve, DeclineParameters, DeclineRate, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let params = DeclineParameters::modified_hyperbolic(
//!     500.0,
//!     DeclineRate::Nominal(0.45),
//!     2.0,
//!     DeclineRate::Nominal(0.05),
//! );
//! let model = CurveModel::from_parameters(&params, &config)?;
//! println!("rate after one year: {:.2}", model.rate(365.25));
//! ```

mod conversions;
mod params;
mod exponential;
mod harmonic;
mod hyperbolic;
mod flat;
mod modified;
mod model;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

pub use conversions::{secant_to_nominal, nominal_to_secant};
pub use params::{DeclineRate, DeclineParameters};
pub use exponential::Exponential;
pub use harmonic::Harmonic;
pub use hyperbolic::Hyperbolic;
pub use flat::Flat;
pub use modified::{ModifiedHyperbolic, SwitchPoint, terminal_switch};
pub use model::CurveModel;

/// Capability shared by every curve variant
pub trait DeclineCurve {
    /// Instantaneous rate at day offset `t`
    fn rate(&self, t: f64) -> f64;

    /// Volume produced between day offsets `t0` and `t1`
    fn volume(&self, t0: f64, t1: f64) -> f64;
}

/// Curve family tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineType {
    Exponential,
    Harmonic,
    Hyperbolic,
    Flat,
    #[serde(alias = "modified hyperbolic")]
    ModifiedHyperbolic,
}

impl DeclineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclineType::Exponential => "exponential",
            DeclineType::Harmonic => "harmonic",
            DeclineType::Hyperbolic => "hyperbolic",
            DeclineType::Flat => "flat",
            DeclineType::ModifiedHyperbolic => "modified_hyperbolic",
        }
    }

    /// Whether the curve depends on a b-factor
    pub fn requires_b(&self) -> bool {
        matches!(self, DeclineType::Hyperbolic | DeclineType::ModifiedHyperbolic)
    }
}

impl fmt::Display for DeclineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclineType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" => Ok(DeclineType::Exponential),
            "harmonic" => Ok(DeclineType::Harmonic),
            "hyperbolic" => Ok(DeclineType::Hyperbolic),
            "flat" => Ok(DeclineType::Flat),
            "modified_hyperbolic" | "modified hyperbolic" => Ok(DeclineType::ModifiedHyperbolic),
            other => Err(ForecastError::config(format!("unknown curve type '{}'", other))),
        }
    }
}

/// Reject NaN and infinite inputs before they reach a formula
pub(crate) fn ensure_finite(name: &str, value: f64) -> crate::error::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ForecastError::domain(format!("{} must be finite, got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decline_type_parse() {
        assert_eq!("exponential".parse::<DeclineType>().unwrap(), DeclineType::Exponential);
        assert_eq!("Hyperbolic".parse::<DeclineType>().unwrap(), DeclineType::Hyperbolic);
        assert_eq!(
            "modified hyperbolic".parse::<DeclineType>().unwrap(),
            DeclineType::ModifiedHyperbolic
        );
        assert!("logistic".parse::<DeclineType>().is_err());
    }

    #[test]
    fn test_decline_type_serde() {
        let tag: DeclineType = serde_json::from_str("\"modified_hyperbolic\"").unwrap();
        assert_eq!(tag, DeclineType::ModifiedHyperbolic);
        assert_eq!(serde_json::to_string(&DeclineType::Flat).unwrap(), "\"flat\"");
    }

    #[test]
    fn test_requires_b() {
        assert!(DeclineType::Hyperbolic.requires_b());
        assert!(DeclineType::ModifiedHyperbolic.requires_b());
        assert!(!DeclineType::Harmonic.requires_b());
    }
}
