#![warn(missing_docs)]
//! Configuration of the ray propagation.
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Configuration data for the propagation of rays through an [`OpticalSystem`](crate::optical_system::OpticalSystem).
///
/// The config contains the following limits
///   - maximum accumulated path length / ray
///   - minimum cumulative intensity / ray
///   - minimum step length. Intersections closer than this distance are regarded as the surface the ray currently
///     sits on and are not counted as forward hits.
pub struct TraceConfig {
    max_path_length: f64,
    min_intensity: f64,
    min_step: f64,
}
impl Default for TraceConfig {
    /// Create a default config with the following parameters:
    ///   - maximum path length / ray: `2000`
    ///   - minimum intensity / ray: `0.01`
    ///   - minimum step: `1e-6`
    fn default() -> Self {
        Self {
            max_path_length: 2000.0,
            min_intensity: 0.01,
            min_step: 1e-6,
        }
    }
}
impl TraceConfig {
    /// Returns the upper limit of the accumulated path length of a ray.
    #[must_use]
    pub const fn max_path_length(&self) -> f64 {
        self.max_path_length
    }
    /// Sets the maximum path length of this [`TraceConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given length is <= 0.0 or not finite.
    pub fn set_max_path_length(&mut self, max_path_length: f64) -> BenchResult<()> {
        if max_path_length <= 0.0 || !max_path_length.is_finite() {
            return Err(BenchError::Config(
                "maximum path length must be >0.0 and finite".into(),
            ));
        }
        self.max_path_length = max_path_length;
        Ok(())
    }
    /// Returns the lower intensity limit. Rays whose cumulative intensity drops to this value stop propagating.
    #[must_use]
    pub const fn min_intensity(&self) -> f64 {
        self.min_intensity
    }
    /// Sets the min intensity of this [`TraceConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given intensity is not within the interval `(0.0..1.0)`.
    pub fn set_min_intensity(&mut self, min_intensity: f64) -> BenchResult<()> {
        if !(0.0..1.0).contains(&min_intensity) {
            return Err(BenchError::Config(
                "minimum intensity must be within (0.0..1.0)".into(),
            ));
        }
        self.min_intensity = min_intensity;
        Ok(())
    }
    /// Returns the minimum step length of this [`TraceConfig`].
    #[must_use]
    pub const fn min_step(&self) -> f64 {
        self.min_step
    }
    /// Sets the min step of this [`TraceConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given step is negative or not finite.
    pub fn set_min_step(&mut self, min_step: f64) -> BenchResult<()> {
        if min_step.is_sign_negative() || !min_step.is_finite() {
            return Err(BenchError::Config(
                "minimum step must be >=0.0 and finite".into(),
            ));
        }
        self.min_step = min_step;
        Ok(())
    }
    /// Check all limits of a [`TraceConfig`], e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// This function will return an error if one of the limits is out of its valid range.
    pub fn validate(&self) -> BenchResult<()> {
        let mut checked = Self::default();
        checked.set_max_path_length(self.max_path_length)?;
        checked.set_min_intensity(self.min_intensity)?;
        checked.set_min_step(self.min_step)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn default() {
        let config = TraceConfig::default();
        assert_eq!(config.max_path_length(), 2000.0);
        assert_eq!(config.min_intensity(), 0.01);
        assert_eq!(config.min_step(), 1e-6);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn set_max_path_length() {
        let mut config = TraceConfig::default();
        assert!(config.set_max_path_length(0.0).is_err());
        assert!(config.set_max_path_length(-1.0).is_err());
        assert!(config.set_max_path_length(f64::NAN).is_err());
        assert!(config.set_max_path_length(f64::INFINITY).is_err());
        assert!(config.set_max_path_length(500.0).is_ok());
        assert_eq!(config.max_path_length, 500.0);
    }
    #[test]
    fn set_min_intensity() {
        let mut config = TraceConfig::default();
        assert!(config.set_min_intensity(-0.1).is_err());
        assert!(config.set_min_intensity(1.0).is_err());
        assert!(config.set_min_intensity(f64::NAN).is_err());
        assert!(config.set_min_intensity(0.0).is_ok());
        assert!(config.set_min_intensity(0.5).is_ok());
        assert_eq!(config.min_intensity, 0.5);
    }
    #[test]
    fn set_min_step() {
        let mut config = TraceConfig::default();
        assert!(config.set_min_step(-1e-3).is_err());
        assert!(config.set_min_step(f64::INFINITY).is_err());
        assert!(config.set_min_step(0.0).is_ok());
        assert_eq!(config.min_step, 0.0);
    }
    #[test]
    fn validate_deserialized() {
        let config: TraceConfig = serde_yaml::from_str("max_path_length: -3.0").unwrap();
        assert!(config.validate().is_err());
        let config: TraceConfig = serde_yaml::from_str("min_intensity: 0.2").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_path_length(), 2000.0);
    }
}
