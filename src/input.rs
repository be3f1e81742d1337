//! Keyboard input to paddle commands
//!
//! The platform layer reports which keys are down each frame; the mapper
//! turns that into at most one command per paddle, refusing moves that
//! would push a paddle off the field.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, Match, PaddleCommand, Side};

/// A key the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Printable key, always lower-case
    Char(char),
    Up,
    Down,
    Escape,
}

impl Key {
    /// Printable key, folded to lower-case so Shift doesn't matter
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

/// Keys held down during the current frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}

/// Up/down keys for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub up: Key,
    pub down: Key,
}

impl Bindings {
    /// W / S
    pub fn left_default() -> Self {
        Self {
            up: Key::Char('w'),
            down: Key::Char('s'),
        }
    }

    /// Arrow keys
    pub fn right_default() -> Self {
        Self {
            up: Key::Up,
            down: Key::Down,
        }
    }

    /// Direction requested by the held keys; both held cancel out
    pub fn direction(&self, keys: &KeyState) -> Option<Direction> {
        match (keys.is_pressed(self.up), keys.is_pressed(self.down)) {
            (true, false) => Some(Direction::Up),
            (false, true) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Maps held keys to paddle commands for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMapper {
    pub left: Bindings,
    pub right: Bindings,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self {
            left: Bindings::left_default(),
            right: Bindings::right_default(),
        }
    }
}

impl InputMapper {
    pub fn new(left: Bindings, right: Bindings) -> Self {
        Self { left, right }
    }

    pub fn bindings(&self, side: Side) -> &Bindings {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Commands for this frame, left paddle first
    ///
    /// A paddle only gets a command if the move keeps it on the field.
    pub fn commands(&self, keys: &KeyState, state: &Match) -> Vec<PaddleCommand> {
        [Side::Left, Side::Right]
            .into_iter()
            .filter_map(|side| {
                let direction = self.bindings(side).direction(keys)?;
                let command = PaddleCommand::new(side, direction);
                state
                    .paddle_in_bounds(side, command.delta())
                    .then_some(command)
            })
            .collect()
    }
}
