//! Axis-aligned collision between the ball and the paddles

use glam::Vec2;

use super::state::{Ball, Paddle};

/// Axis-aligned bounding box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        other.min.x < a_max.x && b_max.x > self.min.x && other.min.y < a_max.y && b_max.y > self.min.y
    }
}

/// Check whether the ball currently overlaps a paddle
pub fn is_collide(paddle: &Paddle, ball: &Ball) -> bool {
    paddle.bounds().overlaps(&ball.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn paddle_at(x: f32, y: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, y),
            score: 0,
        }
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_overlap_hit() {
        let paddle = paddle_at(620.0, 210.0);
        assert!(is_collide(&paddle, &ball_at(610.0, 230.0)));
        assert!(is_collide(&paddle, &ball_at(625.0, 200.0)));
    }

    #[test]
    fn test_far_ball_misses() {
        // Ball centred horizontally never reaches a paddle at the edge
        let paddle = paddle_at(620.0, 210.0);
        assert!(!is_collide(&paddle, &ball_at(400.0, 230.0)));
    }

    #[test]
    fn test_disjoint_on_each_axis() {
        let paddle = paddle_at(100.0, 100.0);
        // Entirely left
        assert!(!is_collide(&paddle, &ball_at(100.0 - BALL_SIZE - 1.0, 120.0)));
        // Entirely right
        assert!(!is_collide(&paddle, &ball_at(100.0 + PADDLE_WIDTH + 1.0, 120.0)));
        // Entirely above
        assert!(!is_collide(&paddle, &ball_at(100.0, 100.0 - BALL_SIZE - 1.0)));
        // Entirely below
        assert!(!is_collide(&paddle, &ball_at(100.0, 100.0 + PADDLE_HEIGHT + 1.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let paddle = paddle_at(100.0, 100.0);
        assert!(!is_collide(&paddle, &ball_at(100.0 - BALL_SIZE, 120.0)));
        assert!(!is_collide(&paddle, &ball_at(100.0 + PADDLE_WIDTH, 120.0)));
        assert!(!is_collide(&paddle, &ball_at(100.0, 100.0 - BALL_SIZE)));
        assert!(!is_collide(&paddle, &ball_at(100.0, 100.0 + PADDLE_HEIGHT)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(20.0, 60.0), Vec2::new(-5.0, 50.0), Vec2::new(20.0, 20.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(20.0, 60.0), Vec2::new(30.0, 70.0), Vec2::new(20.0, 20.0)),
        ];
        for (a_min, a_size, b_min, b_size) in cases {
            let a = Aabb::new(a_min, a_size);
            let b = Aabb::new(b_min, b_size);
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
