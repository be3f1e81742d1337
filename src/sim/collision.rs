//! Collision detection and response
//!
//! All tests are edge-based: the ball's leading boundary point is compared
//! against walls, paddle faces and goal lines with a fixed tolerance.

use super::state::{Ball, Paddle, Side};
use crate::consts::{BALL_VY_MAX, TOLERANCE};

/// Two coordinates close enough to count as touching
#[inline]
pub fn touches(a: f32, b: f32) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Bounce off the top (y = 0) or bottom (y = `height`) of the field
///
/// Returns true if the ball bounced.
pub fn handle_floor_ceiling_collision(ball: &mut Ball, height: f32) -> bool {
    let edge_y = ball.edge().y;
    if touches(edge_y, 0.0) || touches(edge_y, height) {
        ball.vel.y *= -1.0;
        log::trace!("Wall bounce at y={:.1}", ball.pos.y);
        return true;
    }
    false
}

/// Vertical speed for a ball leaving a paddle it struck at height `ball_y`
///
/// Linear in the distance from the paddle's center: 0 for a dead-center hit,
/// ±`BALL_VY_MAX` at either end. The incoming vertical speed plays no part.
#[inline]
pub fn deflection(ball_y: f32, paddle: &Paddle) -> f32 {
    let half = paddle.height / 2.0;
    let dy = ball_y - paddle.center_y();
    BALL_VY_MAX * dy / half
}

/// Bounce off a paddle's inner face
///
/// The horizontal test uses the ball's edge; the vertical test uses its
/// center, so a ball clipping a paddle corner with only its rim passes by.
/// Returns true if the ball bounced.
pub fn handle_paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    let hit = touches(ball.edge().x, paddle.edge()) && paddle.spans(ball.pos.y);
    if hit {
        ball.vel.x *= -1.0;
        ball.vel.y = deflection(ball.pos.y, paddle);
        log::debug!(
            "Ball hit {} paddle at y={:.1}, vy -> {:.2}",
            paddle.side.as_str(),
            ball.pos.y,
            ball.vel.y
        );
    }
    hit
}

/// Has the ball reached the goal line behind `defender`'s paddle?
///
/// The left goal line is x = 0, the right one x = `field_width`. An edge
/// within tolerance of the line counts, and so does one already past it.
pub fn has_scored(ball: &Ball, defender: Side, field_width: f32) -> bool {
    let edge_x = ball.edge().x;
    match defender {
        Side::Left => edge_x <= TOLERANCE,
        Side::Right => edge_x >= field_width - TOLERANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn left_paddle() -> Paddle {
        Paddle::new(Side::Left, Vec2::new(10.0, 200.0))
    }

    fn right_paddle() -> Paddle {
        Paddle::new(Side::Right, Vec2::new(670.0, 200.0))
    }

    /// Ball whose leading edge sits exactly on the left paddle's face
    fn ball_at_left_face(y: f32, vy: f32) -> Ball {
        Ball::new(Vec2::new(30.0 + BALL_RADIUS, y), Vec2::new(-6.0, vy), BALL_RADIUS)
    }

    #[test]
    fn test_ball_bounces_off_ceiling() {
        let mut ball = Ball::new(Vec2::new(300.0, 10.3), Vec2::new(-6.0, -1.0), BALL_RADIUS);
        assert!(handle_floor_ceiling_collision(&mut ball, 500.0));
        assert_eq!(ball.vel, Vec2::new(-6.0, 1.0));
    }

    #[test]
    fn test_ball_bounces_off_floor() {
        let mut ball = Ball::new(Vec2::new(300.0, 489.6), Vec2::new(6.0, 1.5), BALL_RADIUS);
        assert!(handle_floor_ceiling_collision(&mut ball, 500.0));
        assert_eq!(ball.vel, Vec2::new(6.0, -1.5));
    }

    #[test]
    fn test_wall_uses_edge_not_center() {
        // Center is 10 away from the floor, edge is on it
        let mut ball = Ball::new(Vec2::new(300.0, 490.0), Vec2::new(6.0, 1.0), BALL_RADIUS);
        assert!(handle_floor_ceiling_collision(&mut ball, 500.0));

        // Moving up, the leading edge is at 480 - far from the floor
        let mut ball = Ball::new(Vec2::new(300.0, 490.0), Vec2::new(6.0, -1.0), BALL_RADIUS);
        assert!(!handle_floor_ceiling_collision(&mut ball, 500.0));
        assert_eq!(ball.vel.y, -1.0);
    }

    #[test]
    fn test_wall_outside_tolerance_leaves_ball_alone() {
        let mut ball = Ball::new(Vec2::new(300.0, 11.0), Vec2::new(-6.0, -1.0), BALL_RADIUS);
        assert!(!handle_floor_ceiling_collision(&mut ball, 500.0));
        assert_eq!(ball.vel, Vec2::new(-6.0, -1.0));
    }

    #[test]
    fn test_resting_ball_on_floor_flips_zero() {
        // vy = 0 leans downward, so a ball resting on the floor keeps
        // triggering; flipping zero changes nothing
        let mut ball = Ball::new(Vec2::new(300.0, 490.0), Vec2::new(6.0, 0.0), BALL_RADIUS);
        assert!(handle_floor_ceiling_collision(&mut ball, 500.0));
        assert!(handle_floor_ceiling_collision(&mut ball, 500.0));
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_center_hit_leaves_straight() {
        let paddle = left_paddle();
        let mut ball = ball_at_left_face(250.0, 1.7);
        assert!(handle_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel.x, 6.0);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_end_hits_leave_at_max_vy() {
        let paddle = left_paddle();

        let mut top = ball_at_left_face(200.0, 0.0);
        assert!(handle_paddle_collision(&mut top, &paddle));
        assert_eq!(top.vel.y, -BALL_VY_MAX);

        let mut bottom = ball_at_left_face(300.0, 0.0);
        assert!(handle_paddle_collision(&mut bottom, &paddle));
        assert_eq!(bottom.vel.y, BALL_VY_MAX);
    }

    #[test]
    fn test_right_paddle_reflects_toward_left() {
        let paddle = right_paddle();
        let mut ball = Ball::new(
            Vec2::new(670.0 - BALL_RADIUS + 0.4, 225.0),
            Vec2::new(6.0, 0.0),
            BALL_RADIUS,
        );
        assert!(handle_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel.x, -6.0);
        assert_eq!(ball.vel.y, -1.0);
    }

    #[test]
    fn test_paddle_vertical_test_uses_center() {
        let paddle = left_paddle();
        // Rim overlaps the paddle's top end but the center is above it
        let mut ball = ball_at_left_face(195.0, 0.0);
        assert!(!handle_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel, Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn test_paddle_miss_outside_tolerance() {
        let paddle = left_paddle();
        let mut ball = ball_at_left_face(250.0, 0.0);
        ball.pos.x += 0.6;
        assert!(!handle_paddle_collision(&mut ball, &paddle));
    }

    #[test]
    fn test_ball_moving_away_does_not_hit() {
        let paddle = left_paddle();
        // Center just right of the face, moving right: the leading edge is
        // 20 units away from the face
        let mut ball = Ball::new(Vec2::new(40.0, 250.0), Vec2::new(6.0, 0.0), BALL_RADIUS);
        assert!(!handle_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel.x, 6.0);
    }

    #[test]
    fn test_has_scored_at_goal_lines() {
        let width = 700.0;
        let right_bound = Ball::new(Vec2::new(689.8, 250.0), Vec2::new(6.0, 0.0), BALL_RADIUS);
        assert!(has_scored(&right_bound, Side::Right, width));
        assert!(!has_scored(&right_bound, Side::Left, width));

        let left_bound = Ball::new(Vec2::new(10.4, 250.0), Vec2::new(-6.0, 0.0), BALL_RADIUS);
        assert!(has_scored(&left_bound, Side::Left, width));
        assert!(!has_scored(&left_bound, Side::Right, width));
    }

    #[test]
    fn test_has_scored_past_the_line() {
        // Edge already at 709
        let ball = Ball::new(Vec2::new(699.0, 260.0), Vec2::new(6.0, 0.0), BALL_RADIUS);
        assert!(has_scored(&ball, Side::Right, 700.0));
    }

    #[test]
    fn test_has_scored_not_in_midfield() {
        let ball = Ball::new(Vec2::new(350.0, 260.0), Vec2::new(-6.0, 0.0), BALL_RADIUS);
        assert!(!has_scored(&ball, Side::Left, 700.0));
        assert!(!has_scored(&ball, Side::Right, 700.0));

        let near = Ball::new(Vec2::new(689.0, 260.0), Vec2::new(6.0, 0.0), BALL_RADIUS);
        assert!(!has_scored(&near, Side::Right, 700.0));
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_depends_only_on_contact(
            y in 200.0f32..=300.0,
            vy_a in -5.0f32..5.0,
            vy_b in -5.0f32..5.0,
        ) {
            let paddle = left_paddle();
            let mut a = ball_at_left_face(y, vy_a);
            let mut b = ball_at_left_face(y, vy_b);

            prop_assert!(handle_paddle_collision(&mut a, &paddle));
            prop_assert!(handle_paddle_collision(&mut b, &paddle));
            prop_assert_eq!(a.vel.x, 6.0);
            prop_assert_eq!(a.vel.y, b.vel.y);
            prop_assert!(a.vel.y.abs() <= BALL_VY_MAX);
        }

        #[test]
        fn prop_wall_flip_only_near_walls(
            y in 0.0f32..500.0,
            vy in prop_oneof![-3.0f32..-0.01, 0.01f32..3.0],
        ) {
            let mut ball = Ball::new(Vec2::new(350.0, y), Vec2::new(-6.0, vy), BALL_RADIUS);
            let edge_y = ball.edge().y;
            let near_wall = edge_y.abs() <= TOLERANCE || (edge_y - 500.0).abs() <= TOLERANCE;

            let bounced = handle_floor_ceiling_collision(&mut ball, 500.0);
            prop_assert_eq!(bounced, near_wall);
            if near_wall {
                prop_assert_eq!(ball.vel.y, -vy);
            } else {
                prop_assert_eq!(ball.vel.y, vy);
            }
        }
    }
}
