//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Raw mode and alternate screen, restored on drop
//! - Keyboard events to a per-frame `KeyState`
//!
//! Most terminals only report presses plus auto-repeat. When the terminal
//! can report releases too, keys are held until released; otherwise a key
//! stays down for `HOLD_FRAMES` polls after its last press or repeat.

use std::collections::HashMap;
use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::input::{Key, KeyState};

/// Polls a press stays held without a repeat, when releases aren't reported
///
/// Long enough to bridge the gap before the terminal's auto-repeat kicks
/// in at 60 polls a second.
pub const HOLD_FRAMES: u32 = 30;

/// Puts the terminal into game mode and restores it when dropped
pub struct TerminalGuard {
    release_events: bool,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on Drop undoes whatever succeeded
        let mut guard = Self {
            release_events: false,
        };

        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, cursor::MoveTo(0, 0))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            guard.release_events = true;
        }
        log::debug!(
            "Terminal ready, key release events: {}",
            guard.release_events
        );
        Ok(guard)
    }

    /// Whether the terminal reports key releases
    pub fn release_events(&self) -> bool {
        self.release_events
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.release_events {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

/// Result of one keyboard poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Poll {
    pub keys: KeyState,
    pub quit: bool,
}

/// Tracks held keys across frames
#[derive(Debug, Clone)]
pub struct Keyboard {
    /// Key -> polls left before it counts as released
    held: HashMap<Key, u32>,
    release_events: bool,
}

impl Keyboard {
    pub fn new(release_events: bool) -> Self {
        Self {
            held: HashMap::new(),
            release_events,
        }
    }

    /// Drain pending terminal events without blocking
    pub fn poll(&mut self) -> io::Result<Poll> {
        self.decay();

        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= self.handle(key);
            }
        }

        Ok(Poll {
            keys: self.keys(),
            quit,
        })
    }

    /// Apply one key event. Returns true if it asks to quit.
    pub fn handle(&mut self, event: KeyEvent) -> bool {
        if event.kind != KeyEventKind::Release && is_quit(&event) {
            return true;
        }

        let Some(key) = translate(event.code) else {
            return false;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(key, HOLD_FRAMES);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
        false
    }

    /// Keys currently held
    pub fn keys(&self) -> KeyState {
        self.held.keys().copied().collect()
    }

    /// Age presses by one poll. No-op when releases are reported.
    fn decay(&mut self) {
        if self.release_events {
            return;
        }
        self.held.retain(|_, left| {
            *left -= 1;
            *left > 0
        });
    }
}

/// Game key for a terminal key code
pub fn translate(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// q, Esc or Ctrl-C
pub fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}
