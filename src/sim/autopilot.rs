//! Idle/demo mode - the game plays itself
//!
//! Produces the same edge-triggered intents a keyboard would, so the
//! controller cannot tell the difference.

use super::state::{Direction, GamePhase, GameState};
use super::tick::Intent;

/// Intents for the next tick
pub fn autopilot(state: &GameState) -> Vec<Intent> {
    if state.paused || state.quit_requested {
        return Vec::new();
    }

    match state.phase {
        GamePhase::Serving => vec![Intent::Launch],
        GamePhase::GameOver => vec![Intent::Restart],
        GamePhase::LevelComplete => steer(state, Direction::Still),
        GamePhase::InPlay => {
            // Oscillating aim offset so the ball never settles into a vertical loop
            let time_factor = state.time_ticks as f32 * 0.01;
            let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15)
                * state.paddle.rect.width;
            let target = state.ball.pos.x + offset;

            let center = state.paddle.rect.center_x();
            let dead_zone = state.paddle.speed;
            let desired = if target < center - dead_zone {
                Direction::Left
            } else if target > center + dead_zone {
                Direction::Right
            } else {
                Direction::Still
            };
            steer(state, desired)
        }
    }
}

/// Key presses/releases that turn the current direction into `desired`
fn steer(state: &GameState, desired: Direction) -> Vec<Intent> {
    let current = state.paddle.direction;
    if current == desired {
        return Vec::new();
    }
    match desired {
        Direction::Left => vec![Intent::MoveLeft],
        Direction::Right => vec![Intent::MoveRight],
        Direction::Still => match current {
            Direction::Left => vec![Intent::StopLeft],
            Direction::Right => vec![Intent::StopRight],
            Direction::Still => Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;
    use crate::sim::tick::{TickInput, tick};
    use glam::Vec2;

    #[test]
    fn test_launches_when_serving() {
        let state = GameState::standard(1);
        assert_eq!(autopilot(&state), vec![Intent::Launch]);
    }

    #[test]
    fn test_silent_while_paused() {
        let mut state = GameState::standard(1);
        state.paused = true;
        assert!(autopilot(&state).is_empty());
    }

    #[test]
    fn test_restarts_after_game_over() {
        let mut state = GameState::standard(1);
        state.phase = GamePhase::GameOver;
        assert_eq!(autopilot(&state), vec![Intent::Restart]);
    }

    #[test]
    fn test_chases_ball() {
        let mut state = GameState::standard(1);
        state.phase = GamePhase::InPlay;
        state.ball.active = true;
        state.ball.pos = Vec2::new(60.0, 300.0);
        assert_eq!(autopilot(&state), vec![Intent::MoveLeft]);

        state.paddle.move_left();
        assert!(autopilot(&state).is_empty());

        state.ball.pos = Vec2::new(state.paddle.rect.center_x(), 300.0);
        assert_eq!(autopilot(&state), vec![Intent::StopLeft]);

        state.paddle.stop();
        state.ball.pos = Vec2::new(750.0, 300.0);
        assert_eq!(autopilot(&state), vec![Intent::MoveRight]);
    }

    #[test]
    fn test_demo_run_breaks_blocks() {
        let mut state = GameState::standard(2024);
        let mut blocks_hit = 0;
        for _ in 0..20_000 {
            let input = TickInput::new(autopilot(&state));
            tick(&mut state, &input);
            blocks_hit += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BlockHit { .. }))
                .count();
        }
        assert!(blocks_hit > 0);
    }
}
