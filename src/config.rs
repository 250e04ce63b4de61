//! Game tuning
//!
//! One immutable struct handed to every constructor. Loadable from a
//! partial JSON document; missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// Screen, entity and round tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle bottom and the screen bottom
    pub paddle_margin_bottom: f32,
    /// Pixels moved per tick while a direction is held
    pub paddle_speed: f32,
    /// Horizontal velocity added to the ball per unit of paddle direction
    pub paddle_nudge: f32,
    /// Bounce angle at the paddle's left edge (degrees)
    pub paddle_angle_left: f32,
    /// Bounce angle at the paddle's right edge (degrees)
    pub paddle_angle_right: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_initial_speed: f32,
    pub ball_max_speed: f32,
    pub ball_block_acceleration: f32,
    pub ball_paddle_acceleration: f32,
    pub launch_angle_min: f32,
    pub launch_angle_max: f32,

    // === Blocks ===
    pub block_width: f32,
    pub block_height: f32,
    pub block_margin: f32,
    /// Distance from the screen top to the first block row
    pub block_top_offset: f32,
    pub block_darken_step: u8,

    // === Round ===
    pub starting_lives: u8,
    /// Ticks between clearing a level and serving on the next one
    pub level_transition_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin_bottom: PADDLE_MARGIN_BOTTOM,
            paddle_speed: PADDLE_SPEED,
            paddle_nudge: PADDLE_NUDGE,
            paddle_angle_left: PADDLE_ANGLE_LEFT,
            paddle_angle_right: PADDLE_ANGLE_RIGHT,

            ball_radius: BALL_RADIUS,
            ball_initial_speed: BALL_INITIAL_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_block_acceleration: BALL_BLOCK_ACCELERATION,
            ball_paddle_acceleration: BALL_PADDLE_ACCELERATION,
            launch_angle_min: LAUNCH_ANGLE_MIN,
            launch_angle_max: LAUNCH_ANGLE_MAX,

            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_margin: BLOCK_MARGIN,
            block_top_offset: BLOCK_TOP_OFFSET,
            block_darken_step: BLOCK_DARKEN_STEP,

            starting_lives: STARTING_LIVES,
            level_transition_ticks: LEVEL_TRANSITION_TICKS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject degenerate geometry before anything divides by it
    pub fn validate(&self) -> ConfigResult<()> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_margin_bottom", self.paddle_margin_bottom),
            ("paddle_speed", self.paddle_speed),
            ("paddle_nudge", self.paddle_nudge),
            ("paddle_angle_left", self.paddle_angle_left),
            ("paddle_angle_right", self.paddle_angle_right),
            ("ball_radius", self.ball_radius),
            ("ball_initial_speed", self.ball_initial_speed),
            ("ball_max_speed", self.ball_max_speed),
            ("ball_block_acceleration", self.ball_block_acceleration),
            ("ball_paddle_acceleration", self.ball_paddle_acceleration),
            ("launch_angle_min", self.launch_angle_min),
            ("launch_angle_max", self.launch_angle_max),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("block_margin", self.block_margin),
            ("block_top_offset", self.block_top_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_initial_speed", self.ball_initial_speed),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        // Margins, offsets and speed-ups can be zero but never negative
        let non_negative = [
            ("paddle_margin_bottom", self.paddle_margin_bottom),
            ("paddle_nudge", self.paddle_nudge),
            ("ball_block_acceleration", self.ball_block_acceleration),
            ("ball_paddle_acceleration", self.ball_paddle_acceleration),
            ("block_margin", self.block_margin),
            ("block_top_offset", self.block_top_offset),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let top = self.paddle_top();
        if top <= 0.0 || top >= self.screen_height {
            return Err(ConfigError::PaddleOffScreen {
                top,
                screen: self.screen_height,
            });
        }

        if self.paddle_width > self.screen_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                screen: self.screen_width,
            });
        }
        if self.ball_max_speed < self.ball_initial_speed {
            return Err(ConfigError::SpeedCapTooLow {
                initial: self.ball_initial_speed,
                max: self.ball_max_speed,
            });
        }

        // Launch must always head upward
        let launch_ok = self.launch_angle_min > 0.0
            && self.launch_angle_max < 180.0
            && self.launch_angle_min <= self.launch_angle_max;
        if !launch_ok {
            return Err(ConfigError::InvalidAngleRange {
                min: self.launch_angle_min,
                max: self.launch_angle_max,
            });
        }
        let deflect_ok = (0.0..=180.0).contains(&self.paddle_angle_left)
            && (0.0..=180.0).contains(&self.paddle_angle_right);
        if !deflect_ok {
            return Err(ConfigError::InvalidAngleRange {
                min: self.paddle_angle_right,
                max: self.paddle_angle_left,
            });
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.screen_height - self.paddle_margin_bottom - self.paddle_height
    }

    /// Horizontal and vertical distance between neighbouring block origins
    pub fn block_pitch(&self) -> (f32, f32) {
        (
            self.block_width + self.block_margin,
            self.block_height + self.block_margin,
        )
    }
}
