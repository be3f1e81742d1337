//! Rendering module
//!
//! Renderers never see the live session. Each frame the loop captures a
//! `Snapshot` and hands it over; the canvas turns it into a character grid
//! which the terminal backend paints.

pub mod canvas;
pub mod terminal;

use std::io;

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::sim::{Ball, Paddle, Side};

pub use canvas::{Canvas, Cell, Tone};
pub use terminal::TerminalRenderer;

/// Name and score of one player, as shown on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub score: u32,
}

/// Owned copy of everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left: PlayerView,
    pub right: PlayerView,
    /// Message drawn over the field, e.g. the winner
    pub banner: Option<String>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let state = session.state();
        let view = |side: Side| {
            let player = state.player(side);
            PlayerView {
                name: player.name.clone(),
                score: player.score,
            }
        };

        Self {
            width: state.width,
            height: state.height,
            ball: state.ball,
            left_paddle: state.left.paddle,
            right_paddle: state.right.paddle,
            left: view(Side::Left),
            right: view(Side::Right),
            banner: session.banner(),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }
}

/// Something that can draw a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}
