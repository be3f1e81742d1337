//! Pong - two paddles, one ball, first to five
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, scoring, match state)
//! - `input`: Pressed keys to paddle commands
//! - `session`: Frame-level match flow (pause after a point, victory)
//! - `renderer`: Read-only snapshots and terminal drawing
//! - `platform`: Terminal setup and keyboard polling
//! - `settings`: JSON game settings

pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{Bindings, InputMapper, Key, KeyState};
pub use session::{Phase, Session, SessionEvent};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default field dimensions
    pub const FIELD_WIDTH: u32 = 700;
    pub const FIELD_HEIGHT: u32 = 500;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Serve velocity at the start of every rally (toward the left player)
    pub const BALL_VX0: f32 = -6.0;
    pub const BALL_VY0: f32 = 0.0;
    /// Vertical speed after hitting the very top or bottom of a paddle
    pub const BALL_VY_MAX: f32 = 2.0;
    /// The serve starts this far below the field center
    pub const BALL_SPAWN_OFFSET_Y: f32 = 10.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its side of the field
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Distance a paddle moves per tick while its key is held
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Max slack for treating two edges as touching
    pub const TOLERANCE: f32 = 0.5;
    /// Longest ball sub-step; two tolerances so no edge can skip a face
    pub const MAX_SUBSTEP_TRAVEL: f32 = 2.0 * TOLERANCE;

    /// Match flow
    pub const WIN_SCORE: u32 = 5;
    pub const TICK_RATE: u32 = 60;
    pub const SCORE_PAUSE_MS: u64 = 500;
    pub const VICTORY_PAUSE_MS: u64 = 2000;

    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
    /// Longest wall-clock gap (seconds) fed into one loop iteration
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Direction of travel along one axis, with zero counting as positive
#[inline]
pub fn travel_sign(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}
