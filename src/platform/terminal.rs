//! Terminal backend (crossterm)
//!
//! The 640x480 field is drawn on a character grid, one cell per 8x16 pixels.
//! Terminals usually report key presses but not releases, so a key counts as
//! held until it stops repeating for `hold_ms`. When the terminal supports the
//! keyboard enhancement protocol, real release events are used instead.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Color as TermColor};
use crossterm::{cursor, execute, queue, terminal};

use super::{Clock, Color, EventSource, Key, Keyboard, PlatformError, PlatformEvent, Rect, Surface};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::TerminalSettings;

/// Pixels per character cell
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

const GRID_COLS: usize = (SCREEN_WIDTH as u32 / CELL_WIDTH) as usize;
const GRID_ROWS: usize = (SCREEN_HEIGHT as u32 / CELL_HEIGHT) as usize;

const BLOCK: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::BLACK,
    };
}

/// What a raw key event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Press(Key),
    Release(Key),
    Ignore,
}

pub struct TerminalPlatform {
    out: Stdout,
    origin: Instant,
    /// Held keys and when they were last pressed or repeated
    held: HashMap<Key, Instant>,
    hold: Duration,
    enhanced_keyboard: bool,
    frame_budget: Duration,
    last_present: Instant,
    cells: Vec<Cell>,
}

impl TerminalPlatform {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn init(settings: &TerminalSettings) -> Result<Self, PlatformError> {
        terminal::enable_raw_mode()
            .map_err(|e| PlatformError::Init(format!("could not enable raw mode: {e}")))?;

        let now = Instant::now();
        // Built before the remaining setup so Drop restores the terminal on failure
        let mut platform = Self {
            out: io::stdout(),
            origin: now,
            held: HashMap::new(),
            hold: Duration::from_millis(settings.hold_ms),
            enhanced_keyboard: false,
            frame_budget: Duration::from_secs(1) / settings.frame_cap_hz.max(1),
            last_present: now,
            cells: vec![Cell::BLANK; GRID_COLS * GRID_ROWS],
        };

        execute!(
            platform.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )
        .map_err(|e| PlatformError::Init(format!("could not enter alternate screen: {e}")))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                platform.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            platform.enhanced_keyboard = true;
            log::info!("Terminal reports key releases");
        } else {
            log::info!(
                "Terminal has no key release events, holding keys for {} ms",
                settings.hold_ms
            );
        }

        let (cols, rows) = terminal::size()?;
        if (cols as usize) < GRID_COLS || (rows as usize) < GRID_ROWS {
            log::warn!(
                "Terminal is {}x{}, the field needs {}x{} cells",
                cols,
                rows,
                GRID_COLS,
                GRID_ROWS
            );
        }

        Ok(platform)
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        &mut self.cells[row * GRID_COLS + col]
    }

    fn flush_grid(&mut self) -> io::Result<()> {
        let mut current: Option<Color> = None;
        for row in 0..GRID_ROWS {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            let mut run = String::with_capacity(GRID_COLS);
            for col in 0..GRID_COLS {
                let cell = self.cells[row * GRID_COLS + col];
                if current != Some(cell.color) {
                    if !run.is_empty() {
                        queue!(self.out, style::Print(&run))?;
                        run.clear();
                    }
                    queue!(self.out, style::SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                run.push(cell.ch);
            }
            queue!(self.out, style::Print(&run))?;
        }
        self.out.flush()
    }

    fn expire_held_keys(&mut self) {
        if self.enhanced_keyboard {
            return;
        }
        let hold = self.hold;
        self.held.retain(|_, pressed| pressed.elapsed() < hold);
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if self.enhanced_keyboard {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::info!("Terminal restored");
    }
}

impl Surface for TerminalPlatform {
    fn clear(&mut self, color: Color) -> Result<(), PlatformError> {
        self.cells.fill(Cell { ch: ' ', color });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        let cols = cell_span(rect.x, rect.w, CELL_WIDTH, GRID_COLS);
        let rows = cell_span(rect.y, rect.h, CELL_HEIGHT, GRID_ROWS);
        for row in rows {
            for col in cols.clone() {
                *self.cell_mut(col, row) = Cell { ch: BLOCK, color };
            }
        }
        Ok(())
    }

    fn text_size(&mut self, text: &str) -> Result<(u32, u32), PlatformError> {
        if text.chars().any(char::is_control) {
            return Err(PlatformError::Text {
                text: text.to_string(),
                reason: "control characters cannot be drawn".to_string(),
            });
        }
        Ok((text.chars().count() as u32 * CELL_WIDTH, CELL_HEIGHT))
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), PlatformError> {
        let (width, height) = self.text_size(text)?;
        let cols = cell_span(x, width, CELL_WIDTH, GRID_COLS);
        let Some(row) = cell_span(y, height, CELL_HEIGHT, GRID_ROWS).next() else {
            return Ok(());
        };
        let first_col = x.div_euclid(CELL_WIDTH as i32);
        for (i, ch) in text.chars().enumerate() {
            let col = first_col + i as i32;
            if col >= 0 && cols.contains(&(col as usize)) {
                *self.cell_mut(col as usize, row) = Cell { ch, color };
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.flush_grid()?;
        let spent = self.last_present.elapsed();
        if spent < self.frame_budget {
            std::thread::sleep(self.frame_budget - spent);
        }
        self.last_present = Instant::now();
        Ok(())
    }
}

impl Keyboard for TerminalPlatform {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }
}

impl Clock for TerminalPlatform {
    fn ticks_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl EventSource for TerminalPlatform {
    fn poll_event(&mut self) -> Result<Option<PlatformEvent>, PlatformError> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                match classify_key(&key_event) {
                    KeyAction::Quit => return Ok(Some(PlatformEvent::Quit)),
                    KeyAction::Press(key) => {
                        self.held.insert(key, Instant::now());
                    }
                    KeyAction::Release(key) => {
                        self.held.remove(&key);
                    }
                    KeyAction::Ignore => {}
                }
            }
        }
        self.expire_held_keys();
        Ok(None)
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Cells covered by the pixel span `[start, start + len)`, clipped to the grid
fn cell_span(start: i32, len: u32, cell: u32, limit: usize) -> Range<usize> {
    let cell = cell as i64;
    let first = (start as i64).div_euclid(cell).max(0);
    let end = (start as i64 + len as i64 + cell - 1).div_euclid(cell);
    let end = end.clamp(0, limit as i64);
    (first.min(end) as usize)..(end as usize)
}

fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::from_char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

fn classify_key(event: &KeyEvent) -> KeyAction {
    let ctrl_c =
        event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL);
    let Some(key) = map_key_code(event.code) else {
        return KeyAction::Ignore;
    };

    match event.kind {
        KeyEventKind::Release => KeyAction::Release(key),
        _ if ctrl_c || key == Key::Escape || key == Key::Char('q') => KeyAction::Quit,
        _ => KeyAction::Press(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_span_covers_partial_cells() {
        // Paddle at x=620, 20 wide: cells 77..80
        assert_eq!(cell_span(620, 20, CELL_WIDTH, GRID_COLS), 77..80);
        // Ball at y=230, 20 tall: rows 14..16
        assert_eq!(cell_span(230, 20, CELL_HEIGHT, GRID_ROWS), 14..16);
        assert_eq!(cell_span(0, 60, CELL_HEIGHT, GRID_ROWS), 0..4);
    }

    #[test]
    fn test_cell_span_clips_to_grid() {
        assert_eq!(cell_span(-30, 20, CELL_WIDTH, GRID_COLS), 0..0);
        assert_eq!(cell_span(-5, 20, CELL_WIDTH, GRID_COLS), 0..2);
        assert_eq!(cell_span(636, 20, CELL_WIDTH, GRID_COLS), 79..80);
        assert_eq!(cell_span(700, 20, CELL_WIDTH, GRID_COLS), 80..80);
    }

    #[test]
    fn test_classify_keys() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(classify_key(&press(KeyCode::Char('W'))), KeyAction::Press(Key::Char('w')));
        assert_eq!(classify_key(&press(KeyCode::Up)), KeyAction::Press(Key::Up));
        assert_eq!(classify_key(&press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(classify_key(&press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            classify_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(classify_key(&press(KeyCode::F(1))), KeyAction::Ignore);

        let release = KeyEvent::new_with_kind(
            KeyCode::Down,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(classify_key(&release), KeyAction::Release(Key::Down));
    }

    #[test]
    fn test_grid_matches_field() {
        assert_eq!(GRID_COLS, 80);
        assert_eq!(GRID_ROWS, 30);
    }
}
