//! Rendering module
//!
//! Composes each frame from plain rectangles and one line of text on a
//! platform [`Surface`](crate::platform::Surface).

pub mod scene;

pub use scene::{draw_scene, score_text};
