use glam::Vec2;
use rect_pong::platform::{DrawCommand, HeadlessPlatform, Key, PlatformEvent};
use rect_pong::sim::RespawnPolicy;
use rect_pong::timing::Cadence;
use rect_pong::{FrameStatus, Game, Settings};

fn fixed_settings() -> Settings {
    Settings {
        cadence: Cadence::Fixed {
            step_ms: 1,
            max_substeps: 250,
        },
        ..Settings::default()
    }
}

fn score_line(platform: &HeadlessPlatform) -> Option<String> {
    platform.last_frame().iter().find_map(|cmd| match cmd {
        DrawCommand::Text { text, .. } => Some(text.clone()),
        _ => None,
    })
}

#[test]
fn test_unattended_serve_scores_for_right() {
    let mut game = Game::new(&fixed_settings());
    let mut platform = HeadlessPlatform::new(100);

    // Start mark, then 70 frames of 100 updates each
    for _ in 0..71 {
        assert_eq!(game.frame(&mut platform).unwrap(), FrameStatus::Continue);
    }

    assert_eq!(game.state().time_ticks, 7_000);
    // The serve heads left, bounces off the floor and misses the left paddle
    assert_eq!(game.state().scores(), (0, 1));
    assert_eq!(score_line(&platform).as_deref(), Some("0   1"));
    // KeepVelocity: still heading left and up after the bounce
    assert_eq!(game.state().ball.vel, Vec2::new(-0.05, -0.05));
}

#[test]
fn test_left_paddle_returns_ball() {
    let mut game = Game::new(&fixed_settings());
    game.state_mut().ball.pos = Vec2::new(100.0, 215.0);
    game.state_mut().ball.vel = Vec2::new(-0.05, 0.0);
    let mut platform = HeadlessPlatform::new(100);

    // Contact after ~1600 updates, 1800 run in total
    for _ in 0..19 {
        game.frame(&mut platform).unwrap();
    }

    let ball = &game.state().ball;
    assert_eq!(ball.vel.x, 0.05);
    assert!(ball.pos.x > 20.0 && ball.pos.x < 40.0);
    assert_eq!(game.state().scores(), (0, 0));
}

#[test]
fn test_players_move_their_own_paddles() {
    let mut game = Game::new(&fixed_settings());
    let mut platform = HeadlessPlatform::new(100);
    platform.press(Key::Char('w'));

    for _ in 0..31 {
        game.frame(&mut platform).unwrap();
    }
    // 3000 updates at 0.1 would be 300 units; clamped at the top
    assert_eq!(game.state().left.pos.y, 0.0);
    assert_eq!(game.state().right.pos.y, 210.0);

    platform.release(Key::Char('w'));
    platform.press(Key::Char('s'));
    platform.press(Key::Down);
    for _ in 0..60 {
        game.frame(&mut platform).unwrap();
    }
    assert_eq!(game.state().left.pos.y, 420.0);
    assert_eq!(game.state().right.pos.y, 420.0);
}

#[test]
fn test_reserve_policy_serves_loser() {
    let settings = Settings {
        respawn: RespawnPolicy::Reserve,
        ..fixed_settings()
    };
    let mut game = Game::new(&settings);
    game.state_mut().ball.pos = Vec2::new(-19.0, 100.0);
    game.state_mut().ball.vel = Vec2::new(-2.0, 0.0);
    let mut platform = HeadlessPlatform::new(1);

    game.frame(&mut platform).unwrap();
    game.frame(&mut platform).unwrap();

    assert_eq!(game.state().scores(), (0, 1));
    assert_eq!(game.state().ball.vel.x, -0.05);
    assert_eq!(game.state().ball.vel.y.abs(), 0.05);
}

#[test]
fn test_quit_event_ends_run() {
    let mut game = Game::new(&fixed_settings());
    let mut platform = HeadlessPlatform::new(16);

    game.frame(&mut platform).unwrap();
    game.frame(&mut platform).unwrap();
    platform.push_event(PlatformEvent::Quit);

    game.run(&mut platform).unwrap();
    assert_eq!(game.frames(), 2);
    assert_eq!(game.state().time_ticks, 16);
}
