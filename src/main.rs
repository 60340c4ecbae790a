//! Net Rally headless runner
//!
//! Plays an AI-vs-AI demo match and logs what happens. Usage:
//!
//! ```text
//! RUST_LOG=debug net-rally [settings.json] [seconds]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use net_rally::Settings;
    use net_rally::consts::FRAME_MS;
    use net_rally::sim::{GameEvent, GameMode, Match, TickInput};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Net Rally (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(300);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = Match::new(&settings, seed);
    log::info!(
        "Match seed: {}, difficulty: {}",
        game.state().seed,
        settings.difficulty.as_str()
    );
    game.start(GameMode::LocalVersus);

    let input = TickInput::demo();
    let frames = (seconds as f64 * 1000.0 / FRAME_MS) as u64;
    let mut hits = 0u64;
    for _ in 0..frames {
        for event in game.tick_with(&input, FRAME_MS) {
            match event {
                GameEvent::Hit { .. } => hits += 1,
                GameEvent::Score { team } => {
                    let [l, r] = game.state().match_state.scores;
                    log::debug!("Point {:?} ({} - {})", team, l, r);
                }
                GameEvent::RoundWon { team } => log::info!("{:?} wins the round!", team),
                GameEvent::PowerCollected { team, .. } => log::debug!("Power-up for {:?}", team),
                GameEvent::PowerUsed { team } => log::debug!("{:?} used a power-up", team),
            }
        }
    }

    let snap = game.snapshot();
    log::info!(
        "After {}s: round {}, score {} - {}, {} hits, {} power-ups on court",
        seconds,
        snap.round,
        snap.scores[0],
        snap.scores[1],
        hits,
        snap.power_ups.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `net_rally::sim::Match` directly
}
