//! Outer game loop
//!
//! One frame: drain events (stop on quit), ask the pacer how many updates are
//! due, run them against the currently held keys, then draw and present.

use crate::platform::{Keyboard, Platform, PlatformError, PlatformEvent};
use crate::renderer::draw_scene;
use crate::settings::{KeyBindings, Settings};
use crate::sim::{GameEvent, MatchState, PaddleInput, TickInput, update};
use crate::timing::Pacer;

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

/// Build tick input from the keyboard through the configured bindings
pub fn read_input<K: Keyboard + ?Sized>(keyboard: &K, bindings: &KeyBindings) -> TickInput {
    TickInput {
        left: PaddleInput {
            up: keyboard.is_held(bindings.left_up),
            down: keyboard.is_held(bindings.left_down),
        },
        right: PaddleInput {
            up: keyboard.is_held(bindings.right_up),
            down: keyboard.is_held(bindings.right_down),
        },
    }
}

/// Game instance holding all state
pub struct Game {
    state: MatchState,
    bindings: KeyBindings,
    pacer: Pacer,
    frames: u64,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: MatchState::new(settings.tuning, settings.respawn, settings.seed),
            bindings: settings.bindings,
            pacer: Pacer::new(settings.cadence),
            frames: 0,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Outer iterations completed
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single outer iteration
    pub fn frame<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<FrameStatus, PlatformError> {
        while let Some(event) = platform.poll_event()? {
            match event {
                PlatformEvent::Quit => return Ok(FrameStatus::Quit),
            }
        }

        let updates = self.pacer.updates_due(platform.ticks_ms());
        for _ in 0..updates {
            let input = read_input(&*platform, &self.bindings);
            update(&mut self.state, &input);
            self.log_events();
        }

        if self.pacer.should_draw(updates) {
            draw_scene(&self.state, platform)?;
            platform.present()?;
        }

        self.frames += 1;
        Ok(FrameStatus::Continue)
    }

    /// Loop until the platform asks to quit
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<(), PlatformError> {
        log::info!("Match started ({:?})", self.pacer.cadence());
        while self.frame(platform)? == FrameStatus::Continue {}

        let (left, right) = self.state.scores();
        log::info!(
            "Match ended {} - {} after {} ticks ({} frames)",
            left,
            right,
            self.state.time_ticks,
            self.frames
        );
        Ok(())
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::Scored { scorer } => {
                    let (left, right) = self.state.scores();
                    log::info!("Point to {} ({} - {})", scorer.as_str(), left, right);
                }
                GameEvent::PaddleHit(side) => log::trace!("Ball hit {} paddle", side.as_str()),
                GameEvent::WallBounce => log::trace!("Ball bounced off wall"),
            }
        }
    }
}
