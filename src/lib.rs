//! Bounce - A single-screen block-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `config`: Immutable tuning passed to every constructor
//! - `levels`: Static block layouts and block-type table
//!
//! Rendering, input polling and frame pacing live outside this crate; a
//! frontend feeds [`sim::TickInput`] into [`sim::tick`] once per frame and
//! reads the resulting [`sim::GameState`].

pub mod config;
pub mod error;
pub mod levels;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, ConfigResult};
pub use levels::{BlockType, LevelTable, Rgb};

use glam::Vec2;

/// Default tuning constants
pub mod consts {
    /// Simulation rate the tick-based timers are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_MARGIN_BOTTOM: f32 = 30.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Horizontal velocity transferred to the ball from a moving paddle
    pub const PADDLE_NUDGE: f32 = 0.5;
    /// Bounce angle at the far left edge of the paddle (degrees)
    pub const PADDLE_ANGLE_LEFT: f32 = 150.0;
    /// Bounce angle at the far right edge of the paddle (degrees)
    pub const PADDLE_ANGLE_RIGHT: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_INITIAL_SPEED: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    /// Speed gained per block hit
    pub const BALL_BLOCK_ACCELERATION: f32 = 0.2;
    /// Speed gained per paddle hit
    pub const BALL_PADDLE_ACCELERATION: f32 = 0.1;
    /// Launch angle range (degrees from horizontal, upward)
    pub const LAUNCH_ANGLE_MIN: f32 = 45.0;
    pub const LAUNCH_ANGLE_MAX: f32 = 135.0;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 80.0;
    pub const BLOCK_HEIGHT: f32 = 30.0;
    pub const BLOCK_MARGIN: f32 = 5.0;
    pub const BLOCK_TOP_OFFSET: f32 = 50.0;
    /// Per-channel darkening applied to a damaged block
    pub const BLOCK_DARKEN_STEP: u8 = 30;
    pub const SCORE_PER_BLOCK: u32 = 10;

    /// Round defaults
    pub const STARTING_LIVES: u8 = 3;
    /// Pause between clearing a level and building the next one (2 seconds)
    pub const LEVEL_TRANSITION_TICKS: u32 = 2 * TICKS_PER_SECOND;
}

/// Velocity for a heading in degrees, measured counter-clockwise from +x.
///
/// Screen y grows downward, so the vertical component is negated: 90° is
/// straight up.
#[inline]
pub fn heading_to_velocity(speed: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(speed * radians.cos(), -speed * radians.sin())
}

/// Inverse of [`heading_to_velocity`], in degrees
#[inline]
pub fn velocity_heading(vel: Vec2) -> f32 {
    (-vel.y).atan2(vel.x).to_degrees()
}
