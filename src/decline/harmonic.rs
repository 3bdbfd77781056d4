//! Arps harmonic decline (b = 1)

use super::{ensure_finite, DeclineCurve};
use crate::config::EngineConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    qi: f64,
    di: f64,
    days_in_year: f64,
}

impl Harmonic {
    /// `qi` initial rate, `di` nominal annual decline
    pub fn new(qi: f64, di: f64, config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            qi: ensure_finite("qi", qi)?,
            di: ensure_finite("Di", di)?,
            days_in_year: config.days_in_year,
        })
    }

    /// Build from inputs already checked by another model's constructor
    pub(super) fn from_validated(qi: f64, di: f64, days_in_year: f64) -> Self {
        Self {
            qi,
            di,
            days_in_year,
        }
    }

    fn base(&self, t: f64) -> f64 {
        1.0 + self.di * t / self.days_in_year
    }
}

impl DeclineCurve for Harmonic {
    fn rate(&self, t: f64) -> f64 {
        let base = self.base(t);
        // past the pole of an inclining curve the law has no physical rate
        if base <= 0.0 {
            return f64::NAN;
        }
        self.qi / base
    }

    fn volume(&self, t0: f64, t1: f64) -> f64 {
        if self.di == 0.0 {
            return self.qi * (t1 - t0);
        }
        let (base0, base1) = (self.base(t0), self.base(t1));
        if base0 <= 0.0 || base1 <= 0.0 {
            return f64::NAN;
        }
        // linear in qi, so zero and negative rates integrate cleanly
        self.qi * self.days_in_year / self.di * (base1 / base0).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate() {
        let config = EngineConfig::default();
        let curve = Harmonic::new(300.0, 0.5, &config).unwrap();
        // one year in: qi / (1 + Di)
        assert_relative_eq!(curve.rate(config.days_in_year), 200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_volume_closed_form() {
        let config = EngineConfig::default();
        let curve = Harmonic::new(300.0, 0.5, &config).unwrap();
        let (t0, t1) = (365.25, 730.5);
        let expected = 300.0 * config.days_in_year / 0.5 * (curve.rate(t0) / curve.rate(t1)).ln();
        assert_relative_eq!(curve.volume(t0, t1), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_volume_additivity() {
        let curve = Harmonic::new(950.0, 1.3, &EngineConfig::default()).unwrap();
        let split = curve.volume(15.0, 200.0) + curve.volume(200.0, 900.0);
        assert_relative_eq!(split, curve.volume(15.0, 900.0), max_relative = 1e-10);
    }

    #[test]
    fn test_volume_matches_numeric_integral() {
        let curve = Harmonic::new(400.0, 0.9, &EngineConfig::default()).unwrap();
        let n = 10_000;
        let (t0, t1) = (300.0, 330.0);
        let h = (t1 - t0) / n as f64;
        let midpoint: f64 = (0..n)
            .map(|i| curve.rate(t0 + (i as f64 + 0.5) * h) * h)
            .sum();
        assert_relative_eq!(curve.volume(t0, t1), midpoint, max_relative = 1e-8);
    }

    #[test]
    fn test_pole_yields_nan() {
        let curve = Harmonic::new(100.0, -1.0, &EngineConfig::default()).unwrap();
        assert!(curve.rate(400.0).is_nan());
    }

    #[test]
    fn test_zero_qi_volume_is_zero() {
        let curve = Harmonic::new(0.0, 0.7, &EngineConfig::default()).unwrap();
        assert_eq!(curve.rate(120.0), 0.0);
        assert_eq!(curve.volume(0.0, 30.4375), 0.0);
        assert_eq!(curve.volume(912.0, 942.4375), 0.0);
    }

    #[test]
    fn test_negative_qi_mirrors_positive() {
        let config = EngineConfig::default();
        let up = Harmonic::new(250.0, 0.7, &config).unwrap();
        let down = Harmonic::new(-250.0, 0.7, &config).unwrap();
        for (t0, t1) in [(0.0, 30.4375), (400.0, 1200.0)] {
            assert_relative_eq!(down.volume(t0, t1), -up.volume(t0, t1), max_relative = 1e-15);
            assert_relative_eq!(down.rate(t1), -up.rate(t1), max_relative = 1e-15);
        }
    }
}
