//! Terminal backend
//!
//! Paints a `Canvas` with crossterm. Runs of cells sharing a tone are
//! printed in one go so a frame costs a few hundred writes at most.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use super::canvas::{Canvas, Tone};
use super::{Renderer, Snapshot};

pub const BACKGROUND: Color = Color::Rgb {
    r: 91,
    g: 136,
    b: 199,
};

/// Foreground color for a tone
pub fn tone_color(tone: Tone) -> Color {
    let (r, g, b) = match tone {
        Tone::Field => (91, 136, 199),
        Tone::MidLine => (100, 255, 255),
        Tone::Ball => (35, 186, 58),
        Tone::LeftPaddle => (219, 131, 31),
        Tone::RightPaddle => (179, 23, 160),
        Tone::Score => (190, 250, 244),
        Tone::Message => (119, 245, 56),
    };
    Color::Rgb { r, g, b }
}

/// Draws snapshots to any writer, normally stdout
pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            canvas: Canvas::new(cols as usize, rows as usize),
        }
    }

    /// Match a new terminal size
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols as usize, rows as usize) != (self.canvas.cols(), self.canvas.rows()) {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.canvas = Canvas::new(cols as usize, rows as usize);
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.canvas.draw(snapshot);

        queue!(self.out, SetBackgroundColor(BACKGROUND))?;
        for row in 0..self.canvas.rows() {
            queue!(self.out, MoveTo(0, row as u16))?;

            let cells = self.canvas.row(row);
            let mut start = 0;
            while start < cells.len() {
                let tone = cells[start].tone;
                let end = cells[start..]
                    .iter()
                    .position(|c| c.tone != tone)
                    .map_or(cells.len(), |n| start + n);
                let run: String = cells[start..end].iter().map(|c| c.ch).collect();
                queue!(self.out, SetForegroundColor(tone_color(tone)), Print(run))?;
                start = end;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}
