//! Match flow around the simulation
//!
//! The simulation knows nothing about pauses or winning; the session runs
//! it once per frame, holds the field still for a moment after each point,
//! and ends the match once someone reaches the win score. Pauses are
//! counted in frames, so the session never reads a clock.

use crate::input::{InputMapper, KeyState};
use crate::settings::Settings;
use crate::sim::{Match, Side, apply_command, process};

/// Where the match is between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ball in play
    Playing,
    /// Field frozen after a point
    ScorePause { frames_left: u32 },
    /// Winner announced, field frozen
    Victory { winner: Side, frames_left: u32 },
    /// Match over
    Finished { winner: Side },
}

/// Something the frame loop may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// `side` scored and now has `score` points
    Point { side: Side, score: u32 },
    /// `side` reached the win score
    Won { side: Side },
}

/// A match plus everything needed to drive it frame by frame
#[derive(Debug, Clone)]
pub struct Session {
    state: Match,
    phase: Phase,
    input: InputMapper,
    win_score: u32,
    score_pause_frames: u32,
    victory_pause_frames: u32,
    /// Frames run so far, paused ones included
    frames: u64,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        log::info!(
            "New match on a {}x{} field: {} vs {}, first to {}",
            settings.field_width,
            settings.field_height,
            settings.left_name,
            settings.right_name,
            settings.win_score
        );
        Self {
            state: Match::with_players(
                settings.field_width,
                settings.field_height,
                settings.left_name.clone(),
                settings.right_name.clone(),
            ),
            phase: Phase::Playing,
            input: settings.controls.clone(),
            win_score: settings.win_score,
            score_pause_frames: settings.score_pause_frames(),
            victory_pause_frames: settings.victory_pause_frames(),
            frames: 0,
        }
    }

    pub fn state(&self) -> &Match {
        &self.state
    }

    /// Mutable access to the match, for tests and tools
    pub fn state_mut(&mut self) -> &mut Match {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn win_score(&self) -> u32 {
        self.win_score
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// Text to show over the field, if any
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            Phase::Victory { winner, .. } | Phase::Finished { winner } => {
                Some(format!("{} Won!", capitalize(&self.state.player(winner).name)))
            }
            _ => None,
        }
    }

    /// Run one frame
    ///
    /// While playing, the match is processed first and the keys then become
    /// commands for the next tick.
    pub fn frame(&mut self, keys: &KeyState) -> Option<SessionEvent> {
        self.frames += 1;

        match self.phase {
            Phase::Finished { .. } => None,
            Phase::ScorePause { frames_left } => {
                self.phase = Self::count_down(frames_left, Phase::Playing, |frames_left| {
                    Phase::ScorePause { frames_left }
                });
                None
            }
            Phase::Victory {
                winner,
                frames_left,
            } => {
                self.phase = Self::count_down(frames_left, Phase::Finished { winner }, |frames_left| {
                    Phase::Victory {
                        winner,
                        frames_left,
                    }
                });
                if self.is_finished() {
                    log::info!("Match finished after {} frames", self.frames);
                }
                None
            }
            Phase::Playing => {
                let scored = process(&mut self.state).map(|p| (p.side(), p.score));

                for command in self.input.commands(keys, &self.state) {
                    apply_command(&mut self.state, command);
                }

                let (side, score) = scored?;
                Some(self.on_point(side, score))
            }
        }
    }

    fn on_point(&mut self, side: Side, score: u32) -> SessionEvent {
        let (left, right) = self.state.scores();
        log::info!(
            "Point for {} ({}), score {} - {}",
            self.state.player(side).name,
            side.as_str(),
            left,
            right
        );

        if let Some(winner) = self.state.winner(self.win_score).map(|p| p.side()) {
            log::info!("{} wins the match", self.state.player(winner).name);
            self.phase = Self::enter(self.victory_pause_frames, Phase::Finished { winner }, |frames_left| {
                Phase::Victory {
                    winner,
                    frames_left,
                }
            });
            return SessionEvent::Won { side: winner };
        }

        self.phase = Self::enter(self.score_pause_frames, Phase::Playing, |frames_left| {
            Phase::ScorePause { frames_left }
        });
        SessionEvent::Point { side, score }
    }

    /// Start a pause of `frames`, or skip straight to `next` if it is empty
    fn enter(frames: u32, next: Phase, paused: impl FnOnce(u32) -> Phase) -> Phase {
        if frames == 0 { next } else { paused(frames) }
    }

    /// One frame of a pause has passed
    fn count_down(frames_left: u32, next: Phase, paused: impl FnOnce(u32) -> Phase) -> Phase {
        Self::enter(frames_left.saturating_sub(1), next, paused)
    }
}

/// Upper-case the first letter: "left player" -> "Left player"
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
