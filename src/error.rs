//! Configuration and level-data errors
//!
//! Everything is validated up front; the per-tick simulation is infallible.

/// Rejected configuration or level data
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("`{name}` must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("paddle top {top} lies outside the screen height {screen}")]
    PaddleOffScreen { top: f32, screen: f32 },
    #[error("paddle width {paddle} does not fit the screen width {screen}")]
    PaddleTooWide { paddle: f32, screen: f32 },
    #[error("ball speed cap {max} is below the initial speed {initial}")]
    SpeedCapTooLow { initial: f32, max: f32 },
    #[error("angle range [{min}, {max}] must lie within [0, 180] degrees")]
    InvalidAngleRange { min: f32, max: f32 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("level table has no layouts")]
    NoLevels,
    #[error("level {level} contains no blocks")]
    EmptyLevel { level: usize },
    #[error("level {level} row {row} col {col} uses unknown block type {code}")]
    UnknownBlockType {
        level: usize,
        row: usize,
        col: usize,
        code: u8,
    },
    #[error("block type {code} has zero strength")]
    ZeroStrength { code: u8 },
    #[error("level {level} row {row} col {col} lies outside the screen")]
    BlockOutOfBounds { level: usize, row: usize, col: usize },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
