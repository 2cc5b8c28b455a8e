//! Rect Pong - A classic two-paddle Pong
//!
//! Core modules:
//! - `sim`: Per-tick simulation (paddles, ball, collisions, scoring)
//! - `timing`: Update cadence (legacy start gate or fixed timestep)
//! - `renderer`: Scene composition against a drawing surface
//! - `platform`: Surface/keyboard/clock/event seams and backends
//! - `game`: The outer poll-update-draw loop
//! - `settings`: Data-driven bindings, cadence and tuning

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timing;

pub use game::{FrameStatus, Game};
pub use settings::{KeyBindings, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Paddle size
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 60.0;

    /// Ball is a square of this edge length
    pub const BALL_SIZE: f32 = 20.0;

    /// Paddle travel per tick while a key is held
    pub const PADDLE_STEP: f32 = 0.1;
    /// Ball velocity at the start of a match (units per tick, not per second)
    pub const BALL_START_VELOCITY: [f32; 2] = [-0.05, 0.05];

    /// Legacy cadence: nothing runs until this much time has passed since the loop started
    pub const LEGACY_START_DELAY_MS: u64 = 300;
    /// Fixed cadence defaults
    pub const FIXED_STEP_MS: u64 = 1;
    /// Maximum updates per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 250;

    /// Vertical position of the score line
    pub const SCORE_TEXT_Y: i32 = 50;
    /// Gap between the two scores
    pub const SCORE_SEPARATOR: &str = "   ";
}
