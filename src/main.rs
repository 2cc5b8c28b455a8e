//! Rect Pong entry point
//!
//! Loads settings, brings up the terminal backend and runs the game loop.
//! Log output goes to stderr; redirect it (`2>pong.log`) to keep the field clean.

use rect_pong::platform::TerminalPlatform;
use rect_pong::{Game, Settings};

fn main() {
    env_logger::init();
    log::info!("Rect Pong starting...");

    let settings = Settings::load();
    log::debug!("Settings: {:?}", settings);

    // Startup failures are reported but the process still exits successfully
    let mut platform = match TerminalPlatform::init(&settings.terminal) {
        Ok(platform) => platform,
        Err(e) => {
            log::error!("Could not start: {}", e);
            return;
        }
    };

    let mut game = Game::new(&settings);
    if let Err(e) = game.run(&mut platform) {
        log::error!("Game loop stopped: {}", e);
    }

    // Restore the terminal before the final log line
    drop(platform);
    log::info!("Rect Pong exited");
}
