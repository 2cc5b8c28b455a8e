//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One update per call, velocities are per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, is_collide};
pub use state::{Ball, GameEvent, MatchState, Paddle, RespawnPolicy, Side, Tuning};
pub use tick::{PaddleInput, TickInput, move_ball, move_player, respawn, update};
