//! Neon Bike entry point
//!
//! Native builds run a scripted headless session and log the HUD; the
//! browser build is driven through `platform::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), neon_bike::TuningError> {
    use neon_bike::audio::SilentAudio;
    use neon_bike::sim::{Command, Game, GameEvent, Lifecycle, SceneArena, TickInput};
    use neon_bike::{Settings, Tuning};

    const FRAME: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    neon_bike::platform::init_logging();

    // Optional tuning document as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tuning from {path}");
            Tuning::from_path(path)?
        }
        None => Tuning::default(),
    };
    let seed = std::env::var("NEON_BIKE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);

    log::info!("Neon Bike (native) starting, seed {seed}");
    let mut game = Game::new(tuning, Settings::default(), SceneArena::new(), SilentAudio, seed);
    game.command(Command::Start);

    let mut crashes = 0;
    let mut pickups = 0;
    for frame in 0..MAX_FRAMES {
        // Full throttle, weave across the road, hop every second
        let weave = (frame / 90) % 2 == 0;
        let input = TickInput {
            forward: true,
            left: weave,
            right: !weave,
            jump: frame % 60 == 0,
            ..Default::default()
        };
        game.tick(&input, FRAME);

        for event in game.drain_events() {
            match event {
                GameEvent::Crash => crashes += 1,
                GameEvent::Powerup => pickups += 1,
                _ => {}
            }
        }

        if frame % 300 == 0 {
            let hud = game.hud();
            log::info!(
                "t={:>5.1}s score {:>6} distance {:>5} speed {:>3} stunts {:>3} health {:>3} live {}",
                frame as f32 * FRAME,
                hud.score,
                hud.distance,
                hud.speed,
                hud.stunts,
                hud.health,
                game.world().total()
            );
        }
        if game.lifecycle() == Lifecycle::GameOver {
            break;
        }
    }

    let hud = game.hud();
    log::info!(
        "Final: {:?} score {} distance {} stunts {} crashes {} pickups {}",
        game.lifecycle(),
        hud.score,
        hud.distance,
        hud.stunts,
        crashes,
        pickups
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page constructs WebGame; nothing to do here
}
