//! Match state and entity types
//!
//! Everything the simulation mutates lives here: the ball, both players and
//! their paddles, and the field they play on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::travel_sign;

/// Which half of the field a paddle (and its owner) defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Point on the ball's boundary in the direction of travel
    ///
    /// Used for every wall, paddle and goal test instead of the center, so
    /// contact registers when the boundary arrives rather than after the
    /// ball has sunk halfway in.
    pub fn edge(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.radius * travel_sign(self.vel.x),
            self.pos.y + self.radius * travel_sign(self.vel.y),
        )
    }

    /// Integrate one full tick of motion. No clamping.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical displacement applied on the next tick
    pub vy: f32,
    pub side: Side,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2) -> Self {
        Self {
            pos,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            vy: 0.0,
            side,
        }
    }

    /// X of the inner face (the one facing the field center)
    pub fn edge(&self) -> f32 {
        match self.side {
            Side::Left => self.pos.x + self.width,
            Side::Right => self.pos.x,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Whether a horizontal line at `y` crosses the paddle (ends included)
    pub fn spans(&self, y: f32) -> bool {
        self.top() <= y && y <= self.bottom()
    }

    /// Apply the pending vertical velocity. Bounds are the caller's job.
    pub fn advance(&mut self) {
        self.pos.y += self.vy;
    }
}

/// One of the two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub paddle: Paddle,
}

impl Player {
    pub fn new(name: impl Into<String>, paddle: Paddle) -> Self {
        Self {
            name: name.into(),
            score: 0,
            paddle,
        }
    }

    pub fn side(&self) -> Side {
        self.paddle.side
    }
}

/// A match in progress: the field, the ball and both players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub width: u32,
    pub height: u32,
    pub ball: Ball,
    pub left: Player,
    pub right: Player,
}

impl Match {
    /// Create a match with the default player names
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_players(width, height, "left player", "right player")
    }

    /// Create a match with named players, everything at start-of-rally
    pub fn with_players(
        width: u32,
        height: u32,
        left_name: impl Into<String>,
        right_name: impl Into<String>,
    ) -> Self {
        let paddle_y = Self::paddle_spawn_y(height);
        let left = Paddle::new(Side::Left, Vec2::new(PADDLE_MARGIN, paddle_y));
        let right = Paddle::new(
            Side::Right,
            Vec2::new(width as f32 - PADDLE_MARGIN - PADDLE_WIDTH, paddle_y),
        );

        Self {
            width,
            height,
            ball: Ball::new(
                Self::ball_spawn(width, height),
                Vec2::new(BALL_VX0, BALL_VY0),
                BALL_RADIUS,
            ),
            left: Player::new(left_name, left),
            right: Player::new(right_name, right),
        }
    }

    /// Where every rally's serve starts
    pub fn ball_spawn(width: u32, height: u32) -> Vec2 {
        Vec2::new(
            (width / 2) as f32,
            (height / 2) as f32 + BALL_SPAWN_OFFSET_Y,
        )
    }

    /// Top of a vertically centered paddle
    pub fn paddle_spawn_y(height: u32) -> f32 {
        ((height as f32 - PADDLE_HEIGHT) / 2.0).floor()
    }

    /// Back to start-of-rally positions. Scores are kept.
    pub fn reset(&mut self) {
        self.ball.pos = Self::ball_spawn(self.width, self.height);
        self.ball.vel = Vec2::new(BALL_VX0, BALL_VY0);

        let paddle_y = Self::paddle_spawn_y(self.height);
        for player in [&mut self.left, &mut self.right] {
            player.paddle.pos.y = paddle_y;
            player.paddle.vy = 0.0;
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.player(side).paddle
    }

    /// Would `side`'s paddle stay on the field after moving by `delta`?
    pub fn paddle_in_bounds(&self, side: Side, delta: f32) -> bool {
        let paddle = self.paddle(side);
        let y = paddle.pos.y + delta;
        y >= 0.0 && y + paddle.height <= self.height as f32
    }

    /// First player (left checked first) whose score reached `win_score`
    pub fn winner(&self, win_score: u32) -> Option<&Player> {
        [&self.left, &self.right]
            .into_iter()
            .find(|p| p.score >= win_score)
    }

    /// Scores as (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_edge_follows_direction_of_travel() {
        let mut ball = Ball::new(Vec2::new(100.0, 50.0), Vec2::new(-6.0, 2.0), 10.0);
        assert_eq!(ball.edge(), Vec2::new(90.0, 60.0));

        ball.vel = Vec2::new(3.0, -1.5);
        assert_eq!(ball.edge(), Vec2::new(110.0, 40.0));

        // Zero velocity leans positive on both axes
        ball.vel = Vec2::ZERO;
        assert_eq!(ball.edge(), Vec2::new(110.0, 60.0));
    }

    #[test]
    fn test_ball_advance_is_plain_integration() {
        let mut ball = Ball::new(Vec2::new(5.0, 5.0), Vec2::new(-6.0, -9.0), 10.0);
        ball.advance();
        // No clamping, even off the field
        assert_eq!(ball.pos, Vec2::new(-1.0, -4.0));
    }

    #[test]
    fn test_paddle_edges_face_the_center() {
        let left = Paddle::new(Side::Left, Vec2::new(10.0, 200.0));
        let right = Paddle::new(Side::Right, Vec2::new(670.0, 200.0));
        assert_eq!(left.edge(), 30.0);
        assert_eq!(right.edge(), 670.0);
    }

    #[test]
    fn test_paddle_spans_includes_ends() {
        let paddle = Paddle::new(Side::Left, Vec2::new(10.0, 200.0));
        assert!(paddle.spans(200.0));
        assert!(paddle.spans(300.0));
        assert!(paddle.spans(250.0));
        assert!(!paddle.spans(199.9));
        assert!(!paddle.spans(300.1));
    }

    #[test]
    fn test_paddle_advance_does_not_clamp() {
        let mut paddle = Paddle::new(Side::Right, Vec2::new(670.0, 2.0));
        paddle.vy = -5.0;
        paddle.advance();
        assert_eq!(paddle.pos.y, -3.0);
    }

    #[test]
    fn test_new_match_layout() {
        let m = Match::new(700, 500);
        assert_eq!(m.ball.pos, Vec2::new(350.0, 260.0));
        assert_eq!(m.ball.vel, Vec2::new(BALL_VX0, BALL_VY0));
        assert_eq!(m.ball.radius, BALL_RADIUS);

        assert_eq!(m.left.paddle.pos, Vec2::new(10.0, 200.0));
        assert_eq!(m.right.paddle.pos, Vec2::new(670.0, 200.0));
        assert_eq!(m.left.side(), Side::Left);
        assert_eq!(m.right.side(), Side::Right);
        assert_eq!(m.scores(), (0, 0));
        assert_eq!(m.left.name, "left player");
        assert_eq!(m.right.name, "right player");
    }

    #[test]
    fn test_odd_dimensions_round_down() {
        let m = Match::new(701, 501);
        assert_eq!(m.ball.pos, Vec2::new(350.0, 260.0));
        assert_eq!(m.left.paddle.pos.y, 200.0);
    }

    #[test]
    fn test_reset_recenters_and_keeps_scores() {
        let mut m = Match::new(700, 500);
        m.left.score = 3;
        m.right.score = 4;
        m.ball.pos = Vec2::new(12.0, 480.0);
        m.ball.vel = Vec2::new(6.0, -1.3);
        m.left.paddle.pos.y = 0.0;
        m.right.paddle.pos.y = 400.0;
        m.right.paddle.vy = 5.0;

        m.reset();

        assert_eq!(m.ball.pos, Vec2::new(350.0, 260.0));
        assert_eq!(m.ball.vel, Vec2::new(BALL_VX0, BALL_VY0));
        assert_eq!(m.left.paddle.pos.y, 200.0);
        assert_eq!(m.right.paddle.pos.y, 200.0);
        assert_eq!(m.right.paddle.vy, 0.0);
        assert_eq!(m.scores(), (3, 4));
    }

    #[test]
    fn test_paddle_in_bounds() {
        let mut m = Match::new(700, 500);
        assert!(m.paddle_in_bounds(Side::Left, -PADDLE_SPEED));
        assert!(m.paddle_in_bounds(Side::Left, PADDLE_SPEED));

        m.left.paddle.pos.y = 0.0;
        assert!(!m.paddle_in_bounds(Side::Left, -PADDLE_SPEED));
        assert!(m.paddle_in_bounds(Side::Left, PADDLE_SPEED));

        m.right.paddle.pos.y = 400.0;
        assert!(!m.paddle_in_bounds(Side::Right, PADDLE_SPEED));
        assert!(m.paddle_in_bounds(Side::Right, -PADDLE_SPEED));

        // Landing exactly on the edge is allowed
        m.right.paddle.pos.y = 395.0;
        assert!(m.paddle_in_bounds(Side::Right, PADDLE_SPEED));
    }

    #[test]
    fn test_winner_threshold() {
        let mut m = Match::new(700, 500);
        assert!(m.winner(WIN_SCORE).is_none());

        m.right.score = WIN_SCORE - 1;
        assert!(m.winner(WIN_SCORE).is_none());

        m.right.score = WIN_SCORE;
        assert_eq!(m.winner(WIN_SCORE).map(Player::side), Some(Side::Right));
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
        assert_eq!(Side::Left.as_str(), "left");

        let mut m = Match::new(700, 500);
        m.player_mut(Side::Right).score += 1;
        assert_eq!(m.player(Side::Right).score, 1);
        assert_eq!(m.paddle(Side::Left).side, Side::Left);
    }
}
