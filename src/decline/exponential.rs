//! Arps exponential decline
//!
//! Constant nominal decline; a straight line on a semilog rate-time plot.

use super::{ensure_finite, DeclineCurve};
use crate::config::EngineConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    qi: f64,
    di: f64,
    days_in_year: f64,
}

impl Exponential {
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

    pub fn qi(&self) -> f64 {
        self.qi
    }

    pub fn di(&self) -> f64 {
        self.di
    }
}

impl DeclineCurve for Exponential {
    fn rate(&self, t: f64) -> f64 {
        self.qi * (-self.di * t / self.days_in_year).exp()
    }

    fn volume(&self, t0: f64, t1: f64) -> f64 {
        if self.di == 0.0 {
            return self.qi * (t1 - t0);
        }
        (self.rate(t0) - self.rate(t1)) * self.days_in_year / self.di
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config_365() -> EngineConfig {
        EngineConfig::new(365.0, 30.4167).unwrap()
    }

    #[test]
    fn test_rate_and_volume_one_month() {
        let curve = Exponential::new(500.0, 0.30, &config_365()).unwrap();
        let t1 = 30.4167;

        let expected_rate = 500.0 * (-0.30 * t1 / 365.0_f64).exp();
        assert_relative_eq!(curve.rate(t1), expected_rate, max_relative = 1e-12);
        assert_relative_eq!(curve.rate(t1), 487.655, epsilon = 1e-3);

        let expected_volume = (500.0 - expected_rate) * 365.0 / 0.30;
        assert_relative_eq!(curve.volume(0.0, t1), expected_volume, max_relative = 1e-12);
        assert_relative_eq!(curve.volume(0.0, t1), 15019.8, epsilon = 0.1);
    }

    #[test]
    fn test_rate_at_zero_is_qi() {
        let curve = Exponential::new(250.0, 0.7, &EngineConfig::default()).unwrap();
        assert_eq!(curve.rate(0.0), 250.0);
    }

    #[test]
    fn test_volume_additivity() {
        let curve = Exponential::new(1200.0, 0.55, &EngineConfig::default()).unwrap();
        let split = curve.volume(0.0, 400.0) + curve.volume(400.0, 1000.0);
        assert_relative_eq!(split, curve.volume(0.0, 1000.0), max_relative = 1e-10);
    }

    #[test]
    fn test_volume_matches_numeric_integral() {
        let curve = Exponential::new(800.0, 0.4, &EngineConfig::default()).unwrap();
        let n = 10_000;
        let (t0, t1) = (100.0, 130.0);
        let h = (t1 - t0) / n as f64;
        let midpoint: f64 = (0..n)
            .map(|i| curve.rate(t0 + (i as f64 + 0.5) * h) * h)
            .sum();
        assert_relative_eq!(curve.volume(t0, t1), midpoint, max_relative = 1e-8);
    }

    #[test]
    fn test_zero_decline_is_flat() {
        let curve = Exponential::new(90.0, 0.0, &EngineConfig::default()).unwrap();
        assert_eq!(curve.rate(1000.0), 90.0);
        assert_eq!(curve.volume(10.0, 40.0), 90.0 * 30.0);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Exponential::new(100.0, f64::INFINITY, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_zero_and_negative_qi() {
        let config = EngineConfig::default();
        let zero = Exponential::new(0.0, 0.3, &config).unwrap();
        assert_eq!(zero.volume(0.0, 30.4375), 0.0);

        let up = Exponential::new(75.0, 0.3, &config).unwrap();
        let down = Exponential::new(-75.0, 0.3, &config).unwrap();
        assert_relative_eq!(down.volume(60.0, 90.0), -up.volume(60.0, 90.0), max_relative = 1e-15);
    }
}
