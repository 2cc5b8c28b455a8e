//! Scene composition: paddles, ball and the score line

use glam::Vec2;

use crate::consts::*;
use crate::platform::{PlatformError, Rect, Surface};
use crate::sim::MatchState;

/// Colors for game elements
pub mod colors {
    use crate::platform::Color;

    pub const BACKGROUND: Color = Color::BLACK;
    pub const PADDLE: Color = Color::WHITE;
    pub const BALL: Color = Color::WHITE;
    pub const SCORE: Color = Color::WHITE;
}

/// Pixel rectangle for a shape at `pos`; fractional positions truncate toward zero
fn pixel_rect(pos: Vec2, width: f32, height: f32) -> Rect {
    Rect::new(pos.x as i32, pos.y as i32, width as u32, height as u32)
}

/// "left   right"
pub fn score_text(state: &MatchState) -> String {
    let (left, right) = state.scores();
    format!("{left}{SCORE_SEPARATOR}{right}")
}

/// Draw the whole match onto `surface` (does not present)
pub fn draw_scene<S: Surface + ?Sized>(state: &MatchState, surface: &mut S) -> Result<(), PlatformError> {
    surface.clear(colors::BACKGROUND)?;

    for paddle in [&state.left, &state.right] {
        surface.fill_rect(pixel_rect(paddle.pos, PADDLE_WIDTH, PADDLE_HEIGHT), colors::PADDLE)?;
    }
    surface.fill_rect(pixel_rect(state.ball.pos, BALL_SIZE, BALL_SIZE), colors::BALL)?;

    let text = score_text(state);
    let (width, _height) = surface.text_size(&text)?;
    let x = SCREEN_WIDTH as i32 / 2 - width as i32 / 2;
    surface.draw_text(&text, x, SCORE_TEXT_Y, colors::SCORE)?;

    Ok(())
}
