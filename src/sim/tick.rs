//! Per-tick match controller
//!
//! Applies the tick's input intents, then advances paddle and ball and
//! resolves collisions in priority order: walls, paddle, blocks. All motion is
//! expressed per tick, so the result does not depend on wall-clock frame rate.

use serde::{Deserialize, Serialize};

use super::collision::{BounceAxis, block_bounce_axis, first_block_hit};
use super::geometry::Rect;
use super::state::{Block, Direction, GameEvent, GamePhase, GameState, HitOutcome};

/// Edge-triggered player intents (key press / release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    /// Left key released
    StopLeft,
    /// Right key released
    StopRight,
    Launch,
    TogglePause,
    Restart,
    Quit,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for &intent in &input.intents {
        apply_intent(state, intent);
    }

    if state.paused {
        return;
    }

    match state.phase {
        GamePhase::GameOver => {}
        GamePhase::LevelComplete => {
            state.time_ticks += 1;
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                build_level(state);
            }
        }
        GamePhase::Serving | GamePhase::InPlay => {
            state.time_ticks += 1;
            step_physics(state);
        }
    }
}

fn apply_intent(state: &mut GameState, intent: Intent) {
    match intent {
        // Direction changes are tracked even while paused so key state stays in sync
        Intent::MoveLeft => state.paddle.move_left(),
        Intent::MoveRight => state.paddle.move_right(),
        Intent::StopLeft => {
            if state.paddle.direction == Direction::Left {
                state.paddle.stop();
            }
        }
        Intent::StopRight => {
            if state.paddle.direction == Direction::Right {
                state.paddle.stop();
            }
        }
        Intent::TogglePause => {
            state.paused = !state.paused;
            let event = if state.paused {
                GameEvent::Paused
            } else {
                GameEvent::Resumed
            };
            log::debug!("{:?} at tick {}", event, state.time_ticks);
            state.events.push(event);
        }
        Intent::Quit => {
            state.quit_requested = true;
            state.events.push(GameEvent::QuitRequested);
        }
        Intent::Launch => {
            if !state.paused && state.phase == GamePhase::Serving {
                state.ball.launch();
                state.phase = GamePhase::InPlay;
                state.events.push(GameEvent::Launched);
            }
        }
        Intent::Restart => {
            if !state.paused && state.phase == GamePhase::GameOver {
                restart(state);
            }
        }
    }
}

fn step_physics(state: &mut GameState) {
    state.paddle.advance(&state.config);
    // A ball launched this tick leaves from where the paddle is now
    if state.events.contains(&GameEvent::Launched) {
        state.ball.rest_on(&state.paddle);
    }
    state.ball.advance(&state.config);

    // Bottom edge is open
    if state.ball.active && state.ball.rect().top() > state.config.screen_height {
        lose_life(state);
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    if !state.ball.active {
        state.ball.rest_on(&state.paddle);
        return;
    }

    if state
        .paddle
        .resolve_ball_collision(&mut state.ball, &state.config)
    {
        state.events.push(GameEvent::PaddleHit);
        return;
    }

    // At most one block per tick, even if the ball overlaps several
    if let Some(index) = first_block_hit(&state.ball.rect(), &state.blocks) {
        hit_block(state, index);
        if state.blocks.is_empty() {
            complete_level(state);
        }
    }
}

fn hit_block(state: &mut GameState, index: usize) {
    let block = &mut state.blocks[index];
    let block_id = block.id;

    state.score += u64::from(block.points);
    state.events.push(GameEvent::BlockHit {
        block_id,
        points: block.points,
    });

    state.ball.increase_speed(&state.config);
    let outcome = block.hit(state.config.block_darken_step);
    let axis = block_bounce_axis(state.ball.pos.x, &block.rect);

    if outcome == HitOutcome::Destroyed {
        state.blocks.remove(index);
        state.events.push(GameEvent::BlockDestroyed { block_id });
        log::debug!("Block {} destroyed, {} left", block_id, state.blocks.len());
    }

    match axis {
        BounceAxis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
        BounceAxis::Vertical => state.ball.vel.y = -state.ball.vel.y,
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    log::debug!("Life lost, {} left", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.ball.active = false;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    } else {
        state.reset_ball();
        state.phase = GamePhase::Serving;
    }
}

fn complete_level(state: &mut GameState) {
    state.level = state.levels.wrap(state.level + 1);
    state.phase = GamePhase::LevelComplete;
    state.transition_ticks = state.config.level_transition_ticks;
    state.events.push(GameEvent::LevelComplete {
        next_level: state.level,
    });
    log::info!(
        "Level complete, score {}, next level {}",
        state.score,
        state.level + 1
    );
}

fn restart(state: &mut GameState) {
    state.level = 0;
    state.score = 0;
    state.lives = state.config.starting_lives;
    state.events.push(GameEvent::Restarted);
    log::info!("Restarting");
    build_level(state);
}

/// Replace the blocks with the current level's layout and serve
pub fn build_level(state: &mut GameState) {
    state.level = state.levels.wrap(state.level);

    let cells: Vec<_> = state
        .levels
        .layout(state.level)
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &code)| (row, col, code))
        })
        .filter(|&(_, _, code)| code != 0)
        .filter_map(|(row, col, code)| {
            state
                .levels
                .block_type(code)
                .map(|block_type| (row, col, *block_type))
        })
        .collect();

    let (pitch_x, pitch_y) = state.config.block_pitch();
    state.blocks.clear();
    for (row, col, block_type) in cells {
        let rect = Rect::new(
            col as f32 * pitch_x,
            state.config.block_top_offset + row as f32 * pitch_y,
            state.config.block_width,
            state.config.block_height,
        );
        let id = state.next_entity_id();
        state.blocks.push(Block::new(
            id,
            rect,
            block_type.color,
            block_type.points,
            block_type.strength,
        ));
    }

    state.reset_ball();
    state.phase = GamePhase::Serving;
    state.transition_ticks = 0;
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} started with {} blocks",
        state.level + 1,
        state.blocks.len()
    );
}
