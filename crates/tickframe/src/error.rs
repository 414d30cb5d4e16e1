//! # Configuration Error Types
//!
//! The frame operations themselves never fail. Only loading an
//! [`InterpolationConfig`](crate::InterpolationConfig) can.

use thiserror::Error;

/// Errors that can occur while loading interpolation settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The speed limit must be a positive distance.
    #[error("speed limit must be positive, got {0}")]
    InvalidSpeedLimit(i32),

    /// The tick rate is outside the supported range.
    #[error("tick rate must be between 1 and 1000 ticks per second, got {0}")]
    InvalidTickRate(u32),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
