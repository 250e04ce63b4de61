//! Collision queries and bounce geometry
//!
//! Pure functions over rectangles; the controller in `tick` applies the
//! results to entities.

use super::geometry::Rect;
use super::state::Block;

/// Which velocity component a block bounce inverts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Side hit: invert dx
    Horizontal,
    /// Top/bottom hit: invert dy
    Vertical,
}

/// Normalized contact point along the paddle (0 = left edge, 1 = right edge)
pub fn hit_fraction(ball_center_x: f32, paddle: &Rect) -> f32 {
    ((ball_center_x - paddle.left()) / paddle.width).clamp(0.0, 1.0)
}

/// Bounce heading (degrees) for a hit fraction, linear from `left` to `right`
pub fn deflection_angle(fraction: f32, left: f32, right: f32) -> f32 {
    left + (right - left) * fraction
}

/// Side hits are those whose center lies outside the block's horizontal span
pub fn block_bounce_axis(ball_center_x: f32, block: &Rect) -> BounceAxis {
    if block.spans_x(ball_center_x) {
        BounceAxis::Vertical
    } else {
        BounceAxis::Horizontal
    }
}

/// Index of the first block (in collection order) the ball overlaps
pub fn first_block_hit(ball: &Rect, blocks: &[Block]) -> Option<usize> {
    blocks.iter().position(|block| ball.intersects(&block.rect))
}
