//! Single simulation update
//!
//! Advances the match by one tick: paddles, ball, collisions, walls, scoring.

use glam::Vec2;
use rand::Rng;

use super::collision::is_collide;
use super::state::{Ball, GameEvent, MatchState, Paddle, RespawnPolicy, Side};
use crate::consts::*;

/// Held direction keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
}

/// Move a paddle vertically, keeping it inside the field
pub fn move_player(paddle: &mut Paddle, offset: f32) {
    paddle.pos.y = (paddle.pos.y + offset).clamp(0.0, Paddle::max_y());
}

/// Integrate ball position by one tick of velocity
pub fn move_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Put the ball back at the centre of the field
pub fn respawn(state: &mut MatchState, conceded: Side) {
    state.ball.pos = Ball::spawn_point();

    if state.respawn_policy == RespawnPolicy::Reserve {
        let serve = state.tuning.serve_velocity().abs();
        let dir_x = match conceded {
            Side::Left => -1.0,
            Side::Right => 1.0,
        };
        let dir_y = if state.rng.random::<bool>() { 1.0 } else { -1.0 };
        state.ball.vel = Vec2::new(serve.x * dir_x, serve.y * dir_y);
    }
}

/// Advance the match by one tick
pub fn update(state: &mut MatchState, input: &TickInput) {
    state.events.clear();

    let step = state.tuning.paddle_step;
    for (paddle, keys) in [
        (&mut state.left, input.left),
        (&mut state.right, input.right),
    ] {
        if keys.up {
            move_player(paddle, -step);
        }
        if keys.down {
            move_player(paddle, step);
        }
    }

    move_ball(&mut state.ball);

    // Push the ball out to the paddle's inner face before reflecting
    if is_collide(&state.left, &state.ball) {
        let face = state.left.pos.x + PADDLE_WIDTH;
        if state.ball.pos.x < face {
            state.ball.pos.x = face;
        }
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::PaddleHit(Side::Left));
    }
    if is_collide(&state.right, &state.ball) {
        let face = state.right.pos.x - BALL_SIZE;
        if state.ball.pos.x > face {
            state.ball.pos.x = face;
        }
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::PaddleHit(Side::Right));
    }

    // No positional clamp on this axis: the ball may sit past the wall for a tick
    let ball = &mut state.ball;
    let hits_floor = ball.pos.y >= SCREEN_HEIGHT - BALL_SIZE && ball.vel.y > 0.0;
    let hits_ceiling = ball.pos.y <= 0.0 && ball.vel.y < 0.0;
    if hits_floor || hits_ceiling {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    if state.ball.pos.x <= -BALL_SIZE {
        score_point(state, Side::Right);
    }
    if state.ball.pos.x > SCREEN_WIDTH {
        score_point(state, Side::Left);
    }

    state.time_ticks += 1;
}

fn score_point(state: &mut MatchState, scorer: Side) {
    state.paddle_mut(scorer).score += 1;
    respawn(state, scorer.opponent());
    state.events.push(GameEvent::Scored { scorer });
}
