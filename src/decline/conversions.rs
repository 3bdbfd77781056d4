//! Conversion between nominal and secant-effective decline rates
//!
//! Closed forms per curve family:
//! - Exponential: `Di = -ln(1 - De)`, `De = 1 - exp(-Di)`
//! - Harmonic: `Di = De / (1 - De)`, `De = Di / (1 + Di)`
//! - Hyperbolic: `Di = ((1 - De)^-b - 1) / b`, `De = 1 - (1 + b*Di)^(-1/b)`
//!
//! Flat curves carry no decline, so conversion is the identity.

use super::DeclineType;
use crate::error::{ForecastError, Result};

fn require_b(decline_type: DeclineType, b: Option<f64>) -> Result<f64> {
    let b = b.ok_or(ForecastError::MissingParameter {
        parameter: "b",
        curve: decline_type,
    })?;
    if !b.is_finite() || b < 0.0 {
        return Err(ForecastError::domain(format!("b-factor must be finite and >= 0, got {}", b)));
    }
    Ok(b)
}

fn checked(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ForecastError::domain(format!("{} conversion produced {}", what, value)))
    }
}

/// Convert a secant-effective decline to its nominal form
pub fn secant_to_nominal(de: f64, decline_type: DeclineType, b: Option<f64>) -> Result<f64> {
    if decline_type == DeclineType::Flat {
        return Ok(de);
    }
    if !de.is_finite() || de >= 1.0 {
        return Err(ForecastError::domain(format!(
            "secant-effective decline must be finite and below 1, got {}",
            de
        )));
    }

    let di = match decline_type {
        DeclineType::Exponential => -(1.0 - de).ln(),
        DeclineType::Harmonic => de / (1.0 - de),
        DeclineType::Hyperbolic | DeclineType::ModifiedHyperbolic => {
            let b = require_b(decline_type, b)?;
            if b == 0.0 {
                -(1.0 - de).ln()
            } else {
                ((1.0 - de).powf(-b) - 1.0) / b
            }
        }
        DeclineType::Flat => de,
    };

    checked(di, "secant-to-nominal")
}

/// Convert a nominal decline to its secant-effective form
pub fn nominal_to_secant(di: f64, decline_type: DeclineType, b: Option<f64>) -> Result<f64> {
    if decline_type == DeclineType::Flat {
        return Ok(di);
    }
    if !di.is_finite() {
        return Err(ForecastError::domain(format!("nominal decline must be finite, got {}", di)));
    }

    let de = match decline_type {
        DeclineType::Exponential => 1.0 - (-di).exp(),
        DeclineType::Harmonic => {
            if 1.0 + di <= 0.0 {
                return Err(ForecastError::domain(format!(
                    "harmonic nominal decline must exceed -1, got {}",
                    di
                )));
            }
            di / (1.0 + di)
        }
        DeclineType::Hyperbolic | DeclineType::ModifiedHyperbolic => {
            let b = require_b(decline_type, b)?;
            if b == 0.0 {
                1.0 - (-di).exp()
            } else {
                let base = 1.0 + b * di;
                if base <= 0.0 {
                    return Err(ForecastError::domain(format!(
                        "1 + b*Di must be positive, got {}",
                        base
                    )));
                }
                1.0 - base.powf(-1.0 / b)
            }
        }
        DeclineType::Flat => di,
    };

    checked(de, "nominal-to-secant")
}
