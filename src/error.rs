use thiserror::Error;

/// Errors raised while deriving gauge geometry from a [`GaugeConfig`](crate::GaugeConfig).
#[derive(Error, Debug)]
pub enum GaugeError {
    /// The value domain is empty, inverted or not finite.
    #[error("invalid value range: min {min} must be finite and below max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// The angular sweep is empty, inverted or not finite.
    #[error("invalid angle range: min angle {min} must be finite and below max angle {max}")]
    InvalidAngles { min: f64, max: f64 },

    /// Custom segment stops must be strictly increasing.
    #[error("custom segment stop at index {index} does not increase")]
    NonMonotonicStops { index: usize },

    /// A custom segment stop lies outside the value domain.
    #[error("custom segment stop {value} lies outside [{min}, {max}]")]
    StopOutOfRange { value: f64, min: f64, max: f64 },

    /// A radial or angular size is negative or not finite.
    #[error("invalid {name}: {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The configuration document could not be parsed.
    #[error("failed to parse gauge config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GaugeError>;
