//! Character grid rasterizer
//!
//! Row 0 is the score line; the rest of the grid maps onto the field.
//! Shapes are snapped to whole cells, so everything stays visible however
//! small the terminal is.

use std::ops::Range;

use super::Snapshot;
use crate::sim::{Paddle, Side};

/// What a cell shows, used to pick its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Field,
    MidLine,
    Ball,
    LeftPaddle,
    RightPaddle,
    Score,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        tone: Tone::Field,
    };
}

pub const BALL_CHAR: char = 'o';
pub const PADDLE_CHAR: char = '█';
pub const MID_LINE_CHAR: char = '│';

#[derive(Debug, Clone)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Characters of one row, for tests and plain output
    pub fn row_text(&self, row: usize) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    fn set(&mut self, col: usize, row: usize, ch: char, tone: Tone) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = Cell { ch, tone };
        }
    }

    /// Write `text` so that it is centered on `col`
    fn text(&mut self, col: usize, row: usize, text: &str, tone: Tone) {
        let len = text.chars().count();
        let start = col.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            self.set(start + i, row, ch, tone);
        }
    }

    /// Rows available for the field
    fn field_rows(&self) -> usize {
        self.rows.saturating_sub(1)
    }

    /// Redraw the whole grid from a snapshot
    pub fn draw(&mut self, snapshot: &Snapshot) {
        self.cells.fill(Cell::BLANK);
        if self.cols == 0 || self.field_rows() == 0 {
            return;
        }

        let width = snapshot.width as f32;
        let height = snapshot.height as f32;

        // Dashed center line
        let mid = self.cols / 2;
        for row in (1..self.rows).step_by(2) {
            self.set(mid, row, MID_LINE_CHAR, Tone::MidLine);
        }

        for side in [Side::Left, Side::Right] {
            self.paddle(snapshot.paddle(side), width, height);
        }

        let ball = snapshot.ball.pos;
        if (0.0..width).contains(&ball.x) && (0.0..height).contains(&ball.y) {
            let col = scale(ball.x, width, self.cols);
            let row = 1 + scale(ball.y, height, self.field_rows());
            self.set(col, row, BALL_CHAR, Tone::Ball);
        }

        self.text(self.cols / 4, 0, &snapshot.left.score.to_string(), Tone::Score);
        self.text(self.cols * 3 / 4, 0, &snapshot.right.score.to_string(), Tone::Score);

        if let Some(banner) = &snapshot.banner {
            let row = 1 + self.field_rows() / 2;
            self.text(mid, row, banner, Tone::Message);
        }
    }

    fn paddle(&mut self, paddle: &Paddle, width: f32, height: f32) {
        let tone = match paddle.side {
            Side::Left => Tone::LeftPaddle,
            Side::Right => Tone::RightPaddle,
        };
        let cols = span(paddle.pos.x, paddle.pos.x + paddle.width, width, self.cols);
        let rows = span(paddle.top(), paddle.bottom(), height, self.field_rows());
        for row in rows {
            for col in cols.clone() {
                self.set(col, row + 1, PADDLE_CHAR, tone);
            }
        }
    }
}

/// Cell holding field coordinate `v` along an axis of `extent` units
fn scale(v: f32, extent: f32, cells: usize) -> usize {
    let cell = (v * cells as f32 / extent).floor();
    (cell.max(0.0) as usize).min(cells.saturating_sub(1))
}

/// Cells covered by `lo..hi`, at least one wide while any part is on the field
///
/// Multiplies before dividing so a shape ending on a cell boundary ends
/// exactly there instead of spilling into the next cell.
fn span(lo: f32, hi: f32, extent: f32, cells: usize) -> Range<usize> {
    let n = cells as f32;
    let start = (lo * n / extent).floor().clamp(0.0, n) as usize;
    let end = (hi * n / extent).ceil().clamp(0.0, n) as usize;
    if hi <= 0.0 || lo >= extent {
        return 0..0;
    }
    start..end.max((start + 1).min(cells))
}
