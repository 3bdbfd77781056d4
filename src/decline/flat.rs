//! Flat forecast: constant rate
//!
//! Volume follows the monthly bucket convention, `qi * days_in_month` per call, whatever the
//! interval length. Every grid period is one month long, so on the grid the two agree.

use super::{ensure_finite, DeclineCurve};
use crate::config::EngineConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flat {
    qi: f64,
    days_in_month: f64,
}

impl Flat {
    pub fn new(qi: f64, config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            qi: ensure_finite("qi", qi)?,
            days_in_month: config.days_in_month,
        })
    }

    pub fn qi(&self) -> f64 {
        self.qi
    }
}

impl DeclineCurve for Flat {
    fn rate(&self, _t: f64) -> f64 {
        self.qi
    }

    fn volume(&self, _t0: f64, _t1: f64) -> f64 {
        self.qi * self.days_in_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_constant() {
        let curve = Flat::new(75.0, &EngineConfig::default()).unwrap();
        for t in [0.0, 30.4375, 3652.5, 18262.5] {
            assert_eq!(curve.rate(t), 75.0);
        }
    }

    #[test]
    fn test_volume_uses_month_convention() {
        let config = EngineConfig::new(365.0, 30.0).unwrap();
        let curve = Flat::new(10.0, &config).unwrap();
        assert_eq!(curve.volume(0.0, 30.0), 300.0);
        // interval length is ignored
        assert_eq!(curve.volume(0.0, 90.0), 300.0);
        assert_eq!(curve.volume(45.0, 46.0), 300.0);
    }
}
