//! Match state and core simulation types
//!
//! Everything the update step mutates lives in [`MatchState`]; the caller owns
//! it and passes it by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Which half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

/// What happens to the ball's velocity after a point is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnPolicy {
    /// Ball reappears at the centre and keeps flying the way it was going
    #[default]
    KeepVelocity,
    /// Ball is re-served at start speed toward the side that conceded,
    /// vertical direction picked by the match RNG
    Reserve,
}

/// Per-tick movement amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Paddle travel per tick while a key is held
    pub paddle_step: f32,
    /// Serve velocity (units per tick)
    pub ball_velocity: [f32; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_step: PADDLE_STEP,
            ball_velocity: BALL_START_VELOCITY,
        }
    }
}

impl Tuning {
    pub fn serve_velocity(&self) -> Vec2 {
        Vec2::from_array(self.ball_velocity)
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner; x is fixed for the whole match
    pub pos: Vec2,
    pub score: u32,
}

impl Paddle {
    /// Paddle for the given side, vertically centred
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => SCREEN_WIDTH - PADDLE_WIDTH,
        };
        Self {
            pos: Vec2::new(x, Self::max_y() / 2.0),
            score: 0,
        }
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn max_y() -> f32 {
        SCREEN_HEIGHT - PADDLE_HEIGHT
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(vel: Vec2) -> Self {
        Self {
            pos: Self::spawn_point(),
            vel,
        }
    }

    /// Centre of the field, measured from the ball's top-left corner
    pub fn spawn_point() -> Vec2 {
        Vec2::new(
            (SCREEN_WIDTH - BALL_SIZE) / 2.0,
            (SCREEN_HEIGHT - BALL_SIZE) / 2.0,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(BALL_SIZE))
    }
}

/// Things that happened during a single update (for logging/audio hooks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit(Side),
    WallBounce,
    Scored { scorer: Side },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub tuning: Tuning,
    pub respawn_policy: RespawnPolicy,
    /// Updates run so far
    pub time_ticks: u64,
    /// Events from the most recent update only
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Tuning::default(), RespawnPolicy::default(), 0)
    }
}

impl MatchState {
    pub fn new(tuning: Tuning, respawn_policy: RespawnPolicy, seed: u64) -> Self {
        Self {
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball: Ball::new(tuning.serve_velocity()),
            tuning,
            respawn_policy,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }
}
