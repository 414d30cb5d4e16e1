//! # Interpolation Settings
//!
//! Loaded once at startup from a TOML table:
//!
//! ```toml
//! enabled = true
//! speed_limit = 512   # world units per tick, above this motion snaps
//! tick_rate = 30      # simulation ticks per second
//! ```
//!
//! Missing keys take their defaults.

use std::time::Duration;

use serde::Deserialize;
use tickframe_core::{WorldDistance, WORLD_ONE_HALF};

use crate::error::{ConfigError, ConfigResult};

/// Default simulation rate.
pub const DEFAULT_TICK_RATE: u32 = 30;

/// Fastest supported simulation rate.
pub const MAX_TICK_RATE: u32 = 1000;

/// Interpolation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpolationConfig {
    /// When false, frames show tick-quantized state.
    pub enabled: bool,
    /// Largest per-tick planar displacement that is still blended.
    pub speed_limit: WorldDistance,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed_limit: WORLD_ONE_HALF,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl InterpolationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// a validation error for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range setting.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.speed_limit <= 0 {
            return Err(ConfigError::InvalidSpeedLimit(i32::from(self.speed_limit)));
        }
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        Ok(())
    }

    /// Wall time covered by one simulation tick.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InterpolationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.speed_limit, WORLD_ONE_HALF);
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.tick_duration(), Duration::from_micros(33_333));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = InterpolationConfig::from_toml_str("").unwrap();
        assert_eq!(config, InterpolationConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = InterpolationConfig::from_toml_str("speed_limit = 2048\ntick_rate = 60").unwrap();
        assert!(config.enabled);
        assert_eq!(config.speed_limit, 2048);
        assert_eq!(config.tick_rate, 60);
    }

    #[test]
    fn test_disabled() {
        let config = InterpolationConfig::from_toml_str("enabled = false").unwrap();
        assert!(!config.enabled);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = InterpolationConfig::from_toml_str("speed = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = InterpolationConfig::from_toml_str("speed_limit = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeedLimit(0)));

        let err = InterpolationConfig::from_toml_str("tick_rate = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickRate(0)));

        let err = InterpolationConfig::from_toml_str("tick_rate = 5000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickRate(5000)));
    }

    #[test]
    fn test_out_of_range_distance_is_a_parse_error() {
        let err = InterpolationConfig::from_toml_str("speed_limit = 40000").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
