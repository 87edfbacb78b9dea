use thiserror::Error;

/// Unified result type for the tile layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Configuration problems, reported when a config is built or replaced.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidRatio { field: &'static str, value: f64 },
    #[error("{tier} ratio bounds are inverted: min {min} > max {max}")]
    InvertedBounds {
        tier: &'static str,
        min: f64,
        max: f64,
    },
    #[error("bigPercentage must lie in (0, 1], got {0}")]
    BigPercentage(f64),
    #[error("bigClass must not be empty")]
    EmptyBigClass,
    #[error("invalid layout options: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors surfaced by a layout pass or the runtime driving it.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("element provider failure: {0}")]
    Provider(String),
    #[error("style inspection failed: {0}")]
    Style(String),
    #[error("positioner failure: {0}")]
    Positioner(String),
}
