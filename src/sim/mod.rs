//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `process` per frame, no clocks
//! - No rendering, input or platform dependencies
//! - Bounds on paddle movement are checked by the caller

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    deflection, handle_floor_ceiling_collision, handle_paddle_collision, has_scored, touches,
};
pub use state::{Ball, Match, Paddle, Player, Side};
pub use tick::{Direction, PaddleCommand, apply_command, process};
