//! Match state and entity types
//!
//! Everything a renderer needs to draw a frame lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::GameConfig;
use crate::error::ConfigResult;
use crate::levels::{LevelTable, Rgb};
use crate::{heading_to_velocity, velocity_heading};

/// Round progression. Pausing is a separate flag on [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch
    Serving,
    /// Ball in free flight
    InPlay,
    /// All blocks cleared; next level is built when the countdown expires
    LevelComplete,
    /// No lives left; only restart leaves this phase
    GameOver,
}

/// Things that happened during a tick (cleared at the start of each tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the paddle
    Launched,
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball struck a block and scored its points
    BlockHit { block_id: u32, points: u32 },
    /// Block ran out of strength and was removed
    BlockDestroyed { block_id: u32 },
    /// Ball fell out of the bottom
    LifeLost { lives_left: u8 },
    /// Last life lost
    GameOver { score: u64 },
    /// Every block cleared; `next_level` is built after the transition delay
    LevelComplete { next_level: usize },
    /// Blocks for `level` were built and the ball is being served
    LevelStarted { level: usize },
    /// Pause toggled on
    Paused,
    /// Pause toggled off
    Resumed,
    /// Score, lives and level reset after game over
    Restarted,
    /// Quit intent received
    QuitRequested,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center, kept in floating point so per-tick rounding never accumulates
    pub pos: Vec2,
    /// Per-tick displacement
    pub vel: Vec2,
    /// Always equal to `vel.length()`
    pub speed: f32,
    pub radius: f32,
    /// False while resting on the paddle
    pub active: bool,
}

impl Ball {
    pub fn new(pos: Vec2, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut ball = Self {
            pos,
            vel: Vec2::ZERO,
            speed: config.ball_initial_speed,
            radius: config.ball_radius,
            active: false,
        };
        ball.reset(pos, config, rng);
        ball
    }

    /// Park the ball at `pos` with initial speed and a fresh upward launch angle
    pub fn reset(&mut self, pos: Vec2, config: &GameConfig, rng: &mut impl Rng) {
        self.pos = pos;
        self.active = false;
        self.speed = config.ball_initial_speed;
        let angle = rng.random_range(config.launch_angle_min..=config.launch_angle_max);
        self.set_heading(angle);
    }

    pub fn launch(&mut self) {
        self.active = true;
    }

    /// Place the ball on top of the paddle, centered
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.rect.center_x(), paddle.rect.top() - self.radius);
    }

    /// Integrate one tick and bounce off the left, right and top walls.
    ///
    /// The bottom is open: falling out is a lost life, handled by the controller.
    pub fn advance(&mut self, config: &GameConfig) {
        if !self.active {
            return;
        }
        self.pos += self.vel;

        if self.pos.x <= self.radius {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
        }
        if self.pos.x >= config.screen_width - self.radius {
            self.pos.x = config.screen_width - self.radius;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y <= self.radius {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
        }
    }

    /// Block-hit acceleration: step up to the cap, keeping the heading
    pub fn increase_speed(&mut self, config: &GameConfig) {
        if self.speed < config.ball_max_speed {
            self.speed = (self.speed + config.ball_block_acceleration).min(config.ball_max_speed);
            let angle = velocity_heading(self.vel);
            self.set_heading(angle);
        }
    }

    /// Point the velocity along `degrees` at the current speed
    pub fn set_heading(&mut self, degrees: f32) {
        self.vel = heading_to_velocity(self.speed, degrees);
    }

    /// Current heading in degrees (90 = straight up)
    pub fn heading(&self) -> f32 {
        velocity_heading(self.vel)
    }

    /// Collision box
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// Held paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Still,
    Right,
}

impl Direction {
    /// -1, 0 or 1
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Still => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub direction: Direction,
    /// Pixels per tick
    pub speed: f32,
}

impl Paddle {
    /// Centered horizontally, resting above the bottom margin
    pub fn new(config: &GameConfig) -> Self {
        let x = (config.screen_width - config.paddle_width) / 2.0;
        Self {
            rect: Rect::new(x, config.paddle_top(), config.paddle_width, config.paddle_height),
            direction: Direction::Still,
            speed: config.paddle_speed,
        }
    }

    pub fn move_left(&mut self) {
        self.direction = Direction::Left;
    }

    pub fn move_right(&mut self) {
        self.direction = Direction::Right;
    }

    pub fn stop(&mut self) {
        self.direction = Direction::Still;
    }

    pub fn advance(&mut self, config: &GameConfig) {
        self.rect.x += self.speed * self.direction.sign();
        self.rect.clamp_horizontal(0.0, config.screen_width);
    }

    /// Deflect the ball if its box overlaps the paddle. Returns true on contact.
    ///
    /// The bounce angle depends only on where the ball lands: 150° at the
    /// left edge, 90° in the middle, 30° at the right edge.
    pub fn resolve_ball_collision(&self, ball: &mut Ball, config: &GameConfig) -> bool {
        if !ball.rect().touches(&self.rect) {
            return false;
        }

        let fraction = super::collision::hit_fraction(ball.pos.x, &self.rect);
        let angle = super::collision::deflection_angle(
            fraction,
            config.paddle_angle_left,
            config.paddle_angle_right,
        );

        ball.pos.y = self.rect.top() - ball.radius;
        ball.speed = (ball.speed + config.ball_paddle_acceleration).min(config.ball_max_speed);
        ball.set_heading(angle);

        if self.direction != Direction::Still {
            ball.vel.x += self.direction.sign() * config.paddle_nudge;
            // Nudge bends the heading, never the speed
            ball.vel = ball.vel.normalize_or_zero() * ball.speed;
        }
        true
    }
}

/// Result of hitting a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged,
    Destroyed,
}

/// A breakable block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
    /// Hits remaining
    pub strength: u8,
    pub points: u32,
    /// Current display color (darkens with damage)
    pub color: Rgb,
    pub original_color: Rgb,
}

impl Block {
    pub fn new(id: u32, rect: Rect, color: Rgb, points: u32, strength: u8) -> Self {
        Self {
            id,
            rect,
            strength,
            points,
            color,
            original_color: color,
        }
    }

    /// Take one hit. The caller removes destroyed blocks.
    pub fn hit(&mut self, darken_step: u8) -> HitOutcome {
        self.strength = self.strength.saturating_sub(1);
        if self.strength > 0 {
            self.color = self.color.darken(darken_step);
            HitOutcome::Damaged
        } else {
            HitOutcome::Destroyed
        }
    }
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub config: GameConfig,
    pub levels: LevelTable,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Launch-angle RNG
    #[serde(skip)]
    pub rng: Pcg32,
    /// Current level index (always within the level table)
    pub level: usize,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub paused: bool,
    /// Set by the quit intent; the frontend decides when to exit
    pub quit_requested: bool,
    /// Ticks left before the next level is built (LevelComplete only)
    pub transition_ticks: u32,
    /// Unpaused ticks simulated so far
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live blocks, in creation order
    pub blocks: Vec<Block>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Validate the configuration and level data, then serve on level 0
    pub fn new(config: GameConfig, levels: LevelTable, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        levels.validate(&config)?;
        Ok(Self::assemble(config, levels, seed))
    }

    /// Default configuration and the built-in levels
    pub fn standard(seed: u64) -> Self {
        Self::assemble(GameConfig::default(), LevelTable::standard(), seed)
    }

    fn assemble(config: GameConfig, levels: LevelTable, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&config);
        let ball = Ball::new(Vec2::ZERO, &config, &mut rng);

        let mut state = Self {
            lives: config.starting_lives,
            config,
            levels,
            seed,
            rng,
            level: 0,
            score: 0,
            phase: GamePhase::Serving,
            paused: false,
            quit_requested: false,
            transition_ticks: 0,
            time_ticks: 0,
            paddle,
            ball,
            blocks: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        super::tick::build_level(&mut state);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-serve: ball parked on the paddle with a fresh launch angle
    pub fn reset_ball(&mut self) {
        let pos = self.ball.pos;
        self.ball.reset(pos, &self.config, &mut self.rng);
        self.ball.rest_on(&self.paddle);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_level_complete(&self) -> bool {
        self.phase == GamePhase::LevelComplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn active_ball(pos: Vec2, vel: Vec2) -> Ball {
        let config = GameConfig::default();
        let mut ball = Ball::new(pos, &config, &mut Pcg32::seed_from_u64(1));
        ball.vel = vel;
        ball.speed = vel.length();
        ball.launch();
        ball
    }

    #[test]
    fn test_inactive_ball_does_not_move() {
        let config = GameConfig::default();
        let mut ball = Ball::new(Vec2::new(400.0, 300.0), &config, &mut Pcg32::seed_from_u64(7));
        ball.advance(&config);
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert!(!ball.active);
    }

    #[test]
    fn test_launch_is_idempotent() {
        let mut ball = active_ball(Vec2::new(400.0, 300.0), Vec2::new(3.0, -4.0));
        let vel = ball.vel;
        ball.launch();
        assert!(ball.active);
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_left_wall_reflects() {
        let config = GameConfig::default();
        let mut ball = active_ball(Vec2::new(12.0, 300.0), Vec2::new(-3.0, -4.0));
        ball.advance(&config);
        assert_eq!(ball.pos.x, config.ball_radius);
        assert_eq!(ball.vel.x, 3.0);
        assert_eq!(ball.vel.y, -4.0);
    }

    #[test]
    fn test_right_wall_reflects() {
        let config = GameConfig::default();
        let mut ball = active_ball(Vec2::new(788.0, 300.0), Vec2::new(3.0, 4.0));
        ball.advance(&config);
        assert_eq!(ball.pos.x, config.screen_width - config.ball_radius);
        assert_eq!(ball.vel.x, -3.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let config = GameConfig::default();
        let mut ball = active_ball(Vec2::new(400.0, 12.0), Vec2::new(3.0, -4.0));
        ball.advance(&config);
        assert_eq!(ball.pos.y, config.ball_radius);
        assert_eq!(ball.vel.y, 4.0);
    }

    #[test]
    fn test_bottom_is_open() {
        let config = GameConfig::default();
        let mut ball = active_ball(Vec2::new(400.0, 598.0), Vec2::new(0.0, 5.0));
        ball.advance(&config);
        assert_eq!(ball.pos.y, 603.0);
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_increase_speed_keeps_heading_and_caps() {
        let config = GameConfig::default();
        let mut ball = active_ball(Vec2::new(400.0, 300.0), Vec2::new(3.0, -4.0));
        let heading = ball.heading();
        ball.increase_speed(&config);
        assert!((ball.speed - 5.2).abs() < 1e-5);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
        assert!((ball.heading() - heading).abs() < 1e-3);

        ball.speed = 14.9;
        ball.set_heading(heading);
        ball.increase_speed(&config);
        assert_eq!(ball.speed, config.ball_max_speed);
        ball.increase_speed(&config);
        assert_eq!(ball.speed, config.ball_max_speed);
    }

    #[test]
    fn test_paddle_clamped_to_screen() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.move_left();
        for _ in 0..100 {
            paddle.advance(&config);
        }
        assert_eq!(paddle.rect.left(), 0.0);

        paddle.move_right();
        for _ in 0..200 {
            paddle.advance(&config);
        }
        assert_eq!(paddle.rect.right(), config.screen_width);
    }

    #[test]
    fn test_paddle_edge_deflections() {
        let config = GameConfig::default();
        let paddle = Paddle::new(&config);

        let mut ball = active_ball(
            Vec2::new(paddle.rect.left(), paddle.rect.top()),
            Vec2::new(0.0, 5.0),
        );
        assert!(paddle.resolve_ball_collision(&mut ball, &config));
        assert!((ball.heading() - 150.0).abs() < 1e-3);
        assert_eq!(ball.pos.y, paddle.rect.top() - ball.radius);
        assert!((ball.speed - 5.1).abs() < 1e-5);

        let mut ball = active_ball(
            Vec2::new(paddle.rect.right(), paddle.rect.top()),
            Vec2::new(0.0, 5.0),
        );
        assert!(paddle.resolve_ball_collision(&mut ball, &config));
        assert!((ball.heading() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_miss() {
        let config = GameConfig::default();
        let paddle = Paddle::new(&config);
        let mut ball = active_ball(Vec2::new(100.0, 300.0), Vec2::new(0.0, 5.0));
        assert!(!paddle.resolve_ball_collision(&mut ball, &config));
        assert_eq!(ball.vel, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_moving_paddle_nudges_ball() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.move_right();
        let mut ball = active_ball(
            Vec2::new(paddle.rect.center_x(), paddle.rect.top()),
            Vec2::new(0.0, 5.0),
        );
        assert!(paddle.resolve_ball_collision(&mut ball, &config));
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y < 0.0);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_speedup_is_capped() {
        let config = GameConfig::default();
        let paddle = Paddle::new(&config);
        let mut ball = active_ball(
            Vec2::new(paddle.rect.center_x(), paddle.rect.top()),
            Vec2::new(0.0, 15.0),
        );
        assert!(paddle.resolve_ball_collision(&mut ball, &config));
        assert_eq!(ball.speed, config.ball_max_speed);
    }

    #[test]
    fn test_block_needs_strength_hits() {
        let mut block = Block::new(1, Rect::new(0.0, 0.0, 80.0, 30.0), Rgb::WHITE, 70, 3);
        assert_eq!(block.hit(30), HitOutcome::Damaged);
        assert_eq!(block.color, Rgb(225, 225, 225));
        assert_eq!(block.hit(30), HitOutcome::Damaged);
        assert_eq!(block.color, Rgb(195, 195, 195));
        assert_eq!(block.hit(30), HitOutcome::Destroyed);
        assert_eq!(block.original_color, Rgb::WHITE);
    }

    #[test]
    fn test_new_state_serves_level_zero() {
        let state = GameState::standard(42);
        assert_eq!(state.phase, GamePhase::Serving);
        assert_eq!(state.lives, 3);
        assert_eq!(state.blocks.len(), 24);
        assert!(!state.ball.active);
        assert_eq!(state.ball.pos.x, state.paddle.rect.center_x());
        assert_eq!(state.ball.pos.y, state.paddle.rect.top() - state.ball.radius);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig {
            paddle_width: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(config, LevelTable::standard(), 1).is_err());
    }

    #[test]
    fn test_new_rejects_slowing_acceleration() {
        let config = GameConfig {
            ball_block_acceleration: -1.0,
            ..Default::default()
        };
        let err = GameState::new(config, LevelTable::standard(), 1).unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Negative { .. }));
    }

    proptest! {
        #[test]
        fn prop_launch_angle_points_up(seed in any::<u64>()) {
            let config = GameConfig::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let ball = Ball::new(Vec2::new(400.0, 540.0), &config, &mut rng);
            let heading = ball.heading();
            prop_assert!((44.999..=135.001).contains(&heading));
            prop_assert!(ball.vel.y <= 0.0);
            prop_assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
        }

        #[test]
        fn prop_damage_never_brightens(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), strength in 2u8..6) {
            let mut block = Block::new(1, Rect::new(0.0, 0.0, 80.0, 30.0), Rgb(r, g, b), 10, strength);
            let mut hits = 0;
            loop {
                let before = block.color;
                hits += 1;
                if block.hit(30) == HitOutcome::Destroyed {
                    break;
                }
                prop_assert!(block.color.0 <= before.0 && block.color.1 <= before.1 && block.color.2 <= before.2);
                prop_assert_eq!(block.color, before.darken(30));
            }
            prop_assert_eq!(hits, strength);
        }
    }
}
