//! Headless backend
//!
//! Records draw calls instead of showing them and runs on a manual clock.
//! Lets the full game loop run in tests without a terminal.

use std::collections::{HashSet, VecDeque};

use super::{Clock, Color, EventSource, Key, Keyboard, PlatformError, PlatformEvent, Rect, Surface};

/// Glyph cell used to measure text (close to a 28pt monospace font)
pub const GLYPH_WIDTH: u32 = 14;
pub const GLYPH_HEIGHT: u32 = 28;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    now_ms: u64,
    /// Clock advance applied every time the event queue is drained
    frame_ms: u64,
    held: HashSet<Key>,
    pending: VecDeque<PlatformEvent>,
    /// Report `Quit` once this many frames have drained their events
    quit_after: Option<u64>,
    polls: u64,
    recording: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl HeadlessPlatform {
    /// Platform whose clock moves `frame_ms` per frame
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_ms,
            ..Default::default()
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn push_event(&mut self, event: PlatformEvent) {
        self.pending.push_back(event);
    }

    pub fn quit_after_frames(&mut self, frames: u64) {
        self.quit_after = Some(frames);
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Frames whose events have been fully drained
    pub fn frames_polled(&self) -> u64 {
        self.polls
    }
}

impl Surface for HeadlessPlatform {
    fn clear(&mut self, color: Color) -> Result<(), PlatformError> {
        self.recording.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        self.recording.push(DrawCommand::FillRect(rect, color));
        Ok(())
    }

    fn text_size(&mut self, text: &str) -> Result<(u32, u32), PlatformError> {
        if text.is_empty() {
            return Err(PlatformError::Text {
                text: text.to_string(),
                reason: "text has zero width".to_string(),
            });
        }
        Ok((text.chars().count() as u32 * GLYPH_WIDTH, GLYPH_HEIGHT))
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), PlatformError> {
        self.text_size(text)?;
        self.recording.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.last_frame = std::mem::take(&mut self.recording);
        self.frames_presented += 1;
        Ok(())
    }
}

impl Keyboard for HeadlessPlatform {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl Clock for HeadlessPlatform {
    fn ticks_ms(&self) -> u64 {
        self.now_ms
    }
}

impl EventSource for HeadlessPlatform {
    fn poll_event(&mut self) -> Result<Option<PlatformEvent>, PlatformError> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        if self.quit_after.is_some_and(|limit| self.polls >= limit) {
            return Ok(Some(PlatformEvent::Quit));
        }
        self.polls += 1;
        self.now_ms += self.frame_ms;
        Ok(None)
    }
}
