//! Tunable tolerances shared by the solvers.

use serde::{Deserialize, Serialize};

use super::error::{CollisionError, Result};

/// Numeric knobs for GJK, SAT and time-of-impact.
///
/// The defaults are what every un-suffixed entry point uses; the `_with`
/// variants of the solvers take an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Hard cap on GJK iterations.
    pub gjk_max_iterations: usize,
    /// Distances at or below this are treated as touching.
    pub epsilon: f64,
    /// SAT reference-face selection: relative weight of the first polygon's penetration.
    pub sat_relative_bias: f64,
    /// SAT reference-face selection: absolute slack added to the second polygon's penetration.
    pub sat_absolute_bias: f64,
    pub toi_max_iterations: usize,
    /// Separation at which time of impact reports contact.
    pub toi_tolerance: f64,
}

impl CollisionSettings {
    const GJK_MAX_ITERATIONS: usize = 20;
    const EPSILON: f64 = 1e-5;
    const SAT_RELATIVE_BIAS: f64 = 0.95;
    const SAT_ABSOLUTE_BIAS: f64 = 0.01;
    const TOI_MAX_ITERATIONS: usize = 20;
    const TOI_TOLERANCE: f64 = 1e-3;

    /// Parses settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| CollisionError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CollisionError::Settings(e.to_string()))
    }

    /// Rejects values the solvers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.gjk_max_iterations == 0 {
            return Err(CollisionError::Settings(
                "gjk_max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(CollisionError::Settings(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(self.toi_tolerance.is_finite() && self.toi_tolerance > 0.0) {
            return Err(CollisionError::Settings(format!(
                "toi_tolerance must be positive, got {}",
                self.toi_tolerance
            )));
        }
        if !self.sat_relative_bias.is_finite() || !self.sat_absolute_bias.is_finite() {
            return Err(CollisionError::Settings(
                "SAT bias values must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            gjk_max_iterations: Self::GJK_MAX_ITERATIONS,
            epsilon: Self::EPSILON,
            sat_relative_bias: Self::SAT_RELATIVE_BIAS,
            sat_absolute_bias: Self::SAT_ABSOLUTE_BIAS,
            toi_max_iterations: Self::TOI_MAX_ITERATIONS,
            toi_tolerance: Self::TOI_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = CollisionSettings::from_toml("gjk_max_iterations = 32\n").unwrap();
        assert_eq!(settings.gjk_max_iterations, 32);
        assert_eq!(settings.sat_relative_bias, 0.95);
        assert_eq!(settings.sat_absolute_bias, 0.01);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = CollisionSettings {
            epsilon: 1e-4,
            ..CollisionSettings::default()
        };
        let text = settings.to_toml().unwrap();
        assert_eq!(CollisionSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(matches!(
            CollisionSettings::from_toml("gjk_max_iterations = 0"),
            Err(CollisionError::Settings(_))
        ));
        assert!(matches!(
            CollisionSettings::from_toml("epsilon = -1.0"),
            Err(CollisionError::Settings(_))
        ));
        assert!(matches!(
            CollisionSettings::from_toml("epsilon = \"small\""),
            Err(CollisionError::Settings(_))
        ));
    }
}
