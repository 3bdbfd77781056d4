//! Curve model factory
//!
//! Resolves a curve tag and its parameters into a constructed variant once; evaluation then
//! dispatches on the enum rather than on the tag.

use super::{
    DeclineCurve, DeclineParameters, DeclineType, Exponential, Flat, Harmonic, Hyperbolic,
    ModifiedHyperbolic,
};
use crate::config::EngineConfig;
use crate::error::Result;

/// A constructed decline curve of any supported family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveModel {
    Exponential(Exponential),
    Harmonic(Harmonic),
    Hyperbolic(Hyperbolic),
    Flat(Flat),
    ModifiedHyperbolic(ModifiedHyperbolic),
}

impl CurveModel {
    /// Build the model selected by `params.curve()`, converting secant declines to nominal
    pub fn from_parameters(params: &DeclineParameters, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        if let Err(err) = params.validate() {
            log::warn!("rejected {} parameters: {}", params.curve(), err);
            return Err(err);
        }

        let qi = params.require_qi()?;
        let model = match params.curve() {
            DeclineType::Exponential => {
                let di = params.nominal_initial_decline()?;
                CurveModel::Exponential(Exponential::new(qi, di, config)?)
            }
            DeclineType::Harmonic => {
                let di = params.nominal_initial_decline()?;
                CurveModel::Harmonic(Harmonic::new(qi, di, config)?)
            }
            DeclineType::Hyperbolic => {
                let di = params.nominal_initial_decline()?;
                let b = params.require_b()?;
                CurveModel::Hyperbolic(Hyperbolic::new(qi, di, b, config)?)
            }
            DeclineType::Flat => CurveModel::Flat(Flat::new(qi, config)?),
            DeclineType::ModifiedHyperbolic => {
                let di = params.nominal_initial_decline()?;
                let dt = params.nominal_terminal_decline()?;
                let b = params.require_b()?;
                CurveModel::ModifiedHyperbolic(ModifiedHyperbolic::new(qi, di, b, dt, config)?)
            }
        };

        log::debug!("built {} curve from {:?}", model.decline_type(), params);
        Ok(model)
    }

    pub fn decline_type(&self) -> DeclineType {
        match self {
            CurveModel::Exponential(_) => DeclineType::Exponential,
            CurveModel::Harmonic(_) => DeclineType::Harmonic,
            CurveModel::Hyperbolic(_) => DeclineType::Hyperbolic,
            CurveModel::Flat(_) => DeclineType::Flat,
            CurveModel::ModifiedHyperbolic(_) => DeclineType::ModifiedHyperbolic,
        }
    }
}

impl DeclineCurve for CurveModel {
    fn rate(&self, t: f64) -> f64 {
        match self {
            CurveModel::Exponential(m) => m.rate(t),
            CurveModel::Harmonic(m) => m.rate(t),
            CurveModel::Hyperbolic(m) => m.rate(t),
            CurveModel::Flat(m) => m.rate(t),
            CurveModel::ModifiedHyperbolic(m) => m.rate(t),
        }
    }

    fn volume(&self, t0: f64, t1: f64) -> f64 {
        match self {
            CurveModel::Exponential(m) => m.volume(t0, t1),
            CurveModel::Harmonic(m) => m.volume(t0, t1),
            CurveModel::Hyperbolic(m) => m.volume(t0, t1),
            CurveModel::Flat(m) => m.volume(t0, t1),
            CurveModel::ModifiedHyperbolic(m) => m.volume(t0, t1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decline::DeclineRate;
    use crate::error::ForecastError;
    use approx::assert_relative_eq;

    #[test]
    fn test_factory_selects_variant() {
        let config = EngineConfig::default();
        let cases = [
            (DeclineParameters::exponential(100.0, DeclineRate::Nominal(0.3)), DeclineType::Exponential),
            (DeclineParameters::harmonic(100.0, DeclineRate::Nominal(0.3)), DeclineType::Harmonic),
            (DeclineParameters::hyperbolic(100.0, DeclineRate::Nominal(0.3), 1.5), DeclineType::Hyperbolic),
            (DeclineParameters::flat(100.0), DeclineType::Flat),
            (
                DeclineParameters::modified_hyperbolic(100.0, DeclineRate::Nominal(0.3), 1.5, DeclineRate::Nominal(0.06)),
                DeclineType::ModifiedHyperbolic,
            ),
        ];

        for (params, expected) in cases {
            let model = CurveModel::from_parameters(&params, &config).unwrap();
            assert_eq!(model.decline_type(), expected);
            assert_eq!(model.rate(0.0), 100.0);
        }
    }

    #[test]
    fn test_secant_input_converted_per_family() {
        let config = EngineConfig::default();
        let params = DeclineParameters::exponential(100.0, DeclineRate::Secant(0.3));
        let model = CurveModel::from_parameters(&params, &config).unwrap();

        // one year of exponential decline at secant 30% leaves 70%
        assert_relative_eq!(model.rate(config.days_in_year), 70.0, max_relative = 1e-12);

        let params = DeclineParameters::hyperbolic(100.0, DeclineRate::Secant(0.3), 1.5);
        let model = CurveModel::from_parameters(&params, &config).unwrap();
        assert_relative_eq!(model.rate(config.days_in_year), 70.0, max_relative = 1e-12);

        let params = DeclineParameters::harmonic(100.0, DeclineRate::Secant(0.3));
        let model = CurveModel::from_parameters(&params, &config).unwrap();
        assert_relative_eq!(model.rate(config.days_in_year), 70.0, max_relative = 1e-12);
    }

    #[test]
    fn test_factory_propagates_errors() {
        let config = EngineConfig::default();

        let params = DeclineParameters::new(DeclineType::ModifiedHyperbolic, 100.0)
            .with_initial_decline(DeclineRate::Nominal(0.3))
            .with_terminal_decline(DeclineRate::Nominal(0.05));
        assert!(matches!(
            CurveModel::from_parameters(&params, &config),
            Err(ForecastError::MissingParameter { parameter: "b", .. })
        ));

        let params = DeclineParameters::modified_hyperbolic(
            100.0,
            DeclineRate::Nominal(0.05),
            1.5,
            DeclineRate::Nominal(0.3),
        );
        assert!(matches!(
            CurveModel::from_parameters(&params, &config),
            Err(ForecastError::DomainError(_))
        ));

        let params = DeclineParameters::exponential(100.0, DeclineRate::Secant(1.0));
        assert!(matches!(
            CurveModel::from_parameters(&params, &config),
            Err(ForecastError::DomainError(_))
        ));
    }

    #[test]
    fn test_factory_rejects_bad_config() {
        let config = EngineConfig {
            days_in_year: 100.0,
            days_in_month: 30.0,
        };
        let params = DeclineParameters::flat(1.0);
        assert!(matches!(
            CurveModel::from_parameters(&params, &config),
            Err(ForecastError::InvalidConfiguration(_))
        ));
    }
}
