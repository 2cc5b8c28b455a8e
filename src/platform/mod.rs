//! Platform abstraction layer
//!
//! The game only sees these seams:
//! - `Surface`: clear, filled rectangles, text, present
//! - `Keyboard`: is a key currently held
//! - `Clock`: monotonic milliseconds
//! - `EventSource`: quit requests

pub mod headless;
pub mod terminal;

pub use headless::{DrawCommand, HeadlessPlatform};
pub use terminal::TerminalPlatform;

use serde::{Deserialize, Serialize};

/// A keyboard key the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Printable key, stored lowercase
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
    Enter,
}

impl Key {
    /// Case-insensitive for letters, so Shift does not break bindings
    pub fn from_char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Events the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    Quit,
}

/// Failure of a platform resource or call
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Platform initialization failed : {0}")]
    Init(String),

    #[error("I/O error at the platform layer : {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not render text {text:?} : {reason}")]
    Text { text: String, reason: String },
}

/// Drawing target for one frame
pub trait Surface {
    fn clear(&mut self, color: Color) -> Result<(), PlatformError>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError>;
    /// Size in pixels the text would occupy once drawn
    fn text_size(&mut self, text: &str) -> Result<(u32, u32), PlatformError>;
    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), PlatformError>;
    fn present(&mut self) -> Result<(), PlatformError>;
}

pub trait Keyboard {
    fn is_held(&self, key: Key) -> bool;
}

pub trait Clock {
    /// Milliseconds since an arbitrary fixed point; never decreases
    fn ticks_ms(&self) -> u64;
}

pub trait EventSource {
    /// Next pending event, `None` once the queue is drained
    fn poll_event(&mut self) -> Result<Option<PlatformEvent>, PlatformError>;
}

/// Everything the game loop needs from a backend
pub trait Platform: Surface + Keyboard + Clock + EventSource {}

impl<T: Surface + Keyboard + Clock + EventSource> Platform for T {}
