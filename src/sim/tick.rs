//! Simulation tick
//!
//! Core step that advances a match by one frame.

use serde::{Deserialize, Serialize};

use super::collision::{handle_floor_ceiling_collision, handle_paddle_collision, has_scored};
use super::state::{Match, Player, Side};
use crate::consts::*;

/// Vertical direction of a paddle command (screen y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Move one paddle on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleCommand {
    pub side: Side,
    pub direction: Direction,
}

impl PaddleCommand {
    pub fn new(side: Side, direction: Direction) -> Self {
        Self { side, direction }
    }

    /// Vertical displacement this command produces
    pub fn delta(&self) -> f32 {
        self.direction.sign() * PADDLE_SPEED
    }
}

/// Set a paddle's velocity for the next tick
///
/// The caller is expected to have checked `Match::paddle_in_bounds` first;
/// a command is applied as given.
pub fn apply_command(state: &mut Match, command: PaddleCommand) {
    state.player_mut(command.side).paddle.vy = command.delta();
}

/// Advance the match by one tick
///
/// Moves the ball and resolves its collisions, moves the paddles, then
/// checks the goal lines. On a point the scorer's score goes up by one, the
/// field is reset and the scorer is returned.
pub fn process(state: &mut Match) -> Option<&Player> {
    process_ball(state);
    process_paddles(state);

    let scorer = process_score(state)?;
    state.reset();
    Some(state.player(scorer))
}

/// Sub-steps needed so no edge moves more than `MAX_SUBSTEP_TRAVEL` at once
///
/// `BALL_VY_MAX` is included because a paddle hit can raise vy mid-tick.
fn substep_count(vx: f32, vy: f32) -> u32 {
    let fastest = vx.abs().max(vy.abs()).max(BALL_VY_MAX);
    ((fastest / MAX_SUBSTEP_TRAVEL).ceil() as u32).max(1)
}

/// Move the ball and bounce it off walls and paddles
fn process_ball(state: &mut Match) {
    let height = state.height as f32;
    let steps = substep_count(state.ball.vel.x, state.ball.vel.y);

    // Positions are measured from the last velocity change rather than
    // summed, so a tick without contact lands exactly on pos + vel
    let mut anchor = state.ball.pos;
    let mut anchor_step = 0;

    for step in 1..=steps {
        let ball = &mut state.ball;
        let t = (step - anchor_step) as f32 / steps as f32;
        ball.pos = anchor + ball.vel * t;

        let vel_before = ball.vel;
        handle_floor_ceiling_collision(ball, height);
        handle_paddle_collision(ball, &state.left.paddle);
        handle_paddle_collision(ball, &state.right.paddle);

        if ball.vel != vel_before {
            anchor = ball.pos;
            anchor_step = step;
        }
    }
}

/// Apply pending paddle velocity; commands last a single tick
fn process_paddles(state: &mut Match) {
    for player in [&mut state.left, &mut state.right] {
        player.paddle.advance();
        player.paddle.vy = 0.0;
    }
}

/// Credit a point if the ball reached a goal line
fn process_score(state: &mut Match) -> Option<Side> {
    let width = state.width as f32;
    let scorer = if has_scored(&state.ball, Side::Right, width) {
        Side::Left
    } else if has_scored(&state.ball, Side::Left, width) {
        Side::Right
    } else {
        return None;
    };

    state.player_mut(scorer).score += 1;
    Some(scorer)
}
