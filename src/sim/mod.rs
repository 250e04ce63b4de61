//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick deltas only, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (blocks kept in creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{BounceAxis, block_bounce_axis, deflection_angle, first_block_hit, hit_fraction};
pub use geometry::Rect;
pub use state::{Ball, Block, Direction, GameEvent, GamePhase, GameState, HitOutcome, Paddle};
pub use tick::{Intent, TickInput, build_level, tick};
