//! Arps hyperbolic decline
//!
//! `rate(t) = qi / (1 + b*Di*t/c)^(1/b)`. The general formulas divide by `b` and by `1 - b`,
//! so the two degenerate exponents are dispatched here rather than at call sites:
//! - `b = 1` evaluates as [`Harmonic`]
//! - `b = 0` evaluates as [`Exponential`]

use super::{ensure_finite, DeclineCurve, Exponential, Harmonic};
use crate::config::EngineConfig;
use crate::error::{ForecastError, Result};

/// Exponents this close to 1 evaluate with the harmonic law
const HARMONIC_B_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperbolic {
    qi: f64,
    di: f64,
    b: f64,
    days_in_year: f64,
}

impl Hyperbolic {
    /// `qi` initial rate, `di` nominal annual decline, `b` hyperbolic exponent (>= 0)
    pub fn new(qi: f64, di: f64, b: f64, config: &EngineConfig) -> Result<Self> {
        let b = ensure_finite("b", b)?;
        if b < 0.0 {
            return Err(ForecastError::domain(format!("b-factor must be >= 0, got {}", b)));
        }
        Ok(Self {
            qi: ensure_finite("qi", qi)?,
            di: ensure_finite("Di", di)?,
            b,
            days_in_year: config.days_in_year,
        })
    }

    pub fn qi(&self) -> f64 {
        self.qi
    }

    pub fn di(&self) -> f64 {
        self.di
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    fn is_harmonic(&self) -> bool {
        (self.b - 1.0).abs() < HARMONIC_B_TOLERANCE
    }

    fn as_harmonic(&self) -> Harmonic {
        Harmonic::from_validated(self.qi, self.di, self.days_in_year)
    }

    fn as_exponential(&self) -> Exponential {
        Exponential::from_validated(self.qi, self.di, self.days_in_year)
    }

    fn base(&self, t: f64) -> f64 {
        1.0 + self.b * self.di * t / self.days_in_year
    }

    /// Nominal decline in effect at offset `t`
    pub fn moving_decline(&self, t: f64) -> f64 {
        self.di / (1.0 + self.b * self.di * t / self.days_in_year)
    }
}

impl DeclineCurve for Hyperbolic {
    fn rate(&self, t: f64) -> f64 {
        if self.is_harmonic() {
            return self.as_harmonic().rate(t);
        }
        if self.b == 0.0 {
            return self.as_exponential().rate(t);
        }
        let base = self.base(t);
        if base <= 0.0 {
            return f64::NAN;
        }
        self.qi / base.powf(1.0 / self.b)
    }

    fn volume(&self, t0: f64, t1: f64) -> f64 {
        if self.is_harmonic() {
            return self.as_harmonic().volume(t0, t1);
        }
        if self.b == 0.0 {
            return self.as_exponential().volume(t0, t1);
        }
        if self.di == 0.0 {
            return self.qi * (t1 - t0);
        }

        let (base0, base1) = (self.base(t0), self.base(t1));
        if base0 <= 0.0 || base1 <= 0.0 {
            return f64::NAN;
        }
        // moving-decline form rewritten in terms of the base, linear in qi
        let exponent = 1.0 - 1.0 / self.b;
        self.qi * self.days_in_year / ((1.0 - self.b) * self.di)
            * (base0.powf(exponent) - base1.powf(exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn numeric_volume(curve: &Hyperbolic, t0: f64, t1: f64) -> f64 {
        let n = 20_000;
        let h = (t1 - t0) / n as f64;
        (0..n)
            .map(|i| curve.rate(t0 + (i as f64 + 0.5) * h) * h)
            .sum()
    }

    #[test]
    fn test_rate() {
        let config = EngineConfig::default();
        let curve = Hyperbolic::new(500.0, 0.45, 2.0, &config).unwrap();
        // (1 + 2 * 0.45 * 1)^(-1/2)
        let expected = 500.0 / 1.9_f64.sqrt();
        assert_relative_eq!(curve.rate(config.days_in_year), expected, max_relative = 1e-12);
        assert_eq!(curve.rate(0.0), 500.0);
    }

    #[test]
    fn test_b_one_dispatches_to_harmonic_exactly() {
        let config = EngineConfig::default();
        for (qi, di) in [(500.0, 0.45), (12.5, 2.2), (1e4, 0.01)] {
            let hyp = Hyperbolic::new(qi, di, 1.0, &config).unwrap();
            let har = Harmonic::new(qi, di, &config).unwrap();
            for t in [0.0, 30.4375, 412.0, 7300.0] {
                assert_eq!(hyp.rate(t), har.rate(t));
                assert_eq!(hyp.volume(t, t + 30.4375), har.volume(t, t + 30.4375));
            }
        }
    }

    #[test]
    fn test_b_zero_dispatches_to_exponential() {
        let config = EngineConfig::default();
        let hyp = Hyperbolic::new(500.0, 0.3, 0.0, &config).unwrap();
        let exp = Exponential::new(500.0, 0.3, &config).unwrap();
        assert_eq!(hyp.rate(600.0), exp.rate(600.0));
        assert_eq!(hyp.volume(0.0, 600.0), exp.volume(0.0, 600.0));
    }

    #[test]
    fn test_volume_matches_numeric_integral() {
        let config = EngineConfig::default();
        for b in [0.3, 0.9, 1.5, 2.0] {
            let curve = Hyperbolic::new(650.0, 0.8, b, &config).unwrap();
            for (t0, t1) in [(0.0, 30.4375), (912.0, 942.4375)] {
                assert_relative_eq!(
                    curve.volume(t0, t1),
                    numeric_volume(&curve, t0, t1),
                    max_relative = 1e-7
                );
            }
        }
    }

    #[test]
    fn test_volume_additivity() {
        let curve = Hyperbolic::new(700.0, 1.1, 1.4, &EngineConfig::default()).unwrap();
        let split = curve.volume(0.0, 250.0) + curve.volume(250.0, 1800.0);
        assert_relative_eq!(split, curve.volume(0.0, 1800.0), max_relative = 1e-10);
    }

    #[test]
    fn test_moving_decline() {
        let config = EngineConfig::default();
        let curve = Hyperbolic::new(500.0, 0.45, 2.0, &config).unwrap();
        assert_eq!(curve.moving_decline(0.0), 0.45);
        assert_relative_eq!(
            curve.moving_decline(config.days_in_year),
            0.45 / 1.9,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rejects_negative_b() {
        assert!(matches!(
            Hyperbolic::new(100.0, 0.3, -1.0, &EngineConfig::default()),
            Err(ForecastError::DomainError(_))
        ));
    }

    #[test]
    fn test_zero_qi_volume_is_zero() {
        let config = EngineConfig::default();
        for b in [0.5, 1.0, 1.5, 2.0] {
            let curve = Hyperbolic::new(0.0, 0.9, b, &config).unwrap();
            assert_eq!(curve.rate(500.0), 0.0);
            assert_eq!(curve.volume(0.0, 30.4375), 0.0);
            assert_eq!(curve.volume(912.0, 942.4375), 0.0);
        }
    }

    #[test]
    fn test_negative_qi_mirrors_positive() {
        let config = EngineConfig::default();
        for b in [0.5, 1.0, 1.5, 2.0] {
            let up = Hyperbolic::new(10.0, 0.9, b, &config).unwrap();
            let down = Hyperbolic::new(-10.0, 0.9, b, &config).unwrap();
            for (t0, t1) in [(0.0, 30.4375), (912.0, 942.4375)] {
                assert_relative_eq!(down.volume(t0, t1), -up.volume(t0, t1), max_relative = 1e-15);
                assert_relative_eq!(down.rate(t0), -up.rate(t0), max_relative = 1e-15);
            }
        }
    }

    #[test]
    fn test_moving_decline_form_agrees() {
        let config = EngineConfig::default();
        let curve = Hyperbolic::new(650.0, 0.8, 1.6, &config).unwrap();
        let (t0, t1) = (300.0, 330.4375);
        let (q0, q1) = (curve.rate(t0), curve.rate(t1));
        let b = curve.b();
        let moving = q0.powf(b) / ((1.0 - b) * curve.moving_decline(t0))
            * (q0.powf(1.0 - b) - q1.powf(1.0 - b))
            * config.days_in_year;
        assert_relative_eq!(curve.volume(t0, t1), moving, max_relative = 1e-10);
    }
}
