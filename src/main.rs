//! Ludos Engine Demo
//!
//! Plays a seeded bot match, then replays its history and checks that the
//! replay lands on the same state hash.
//!
//! Usage: `ludo-engine [config.json]`. Log level comes from `RUST_LOG`.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ludo_engine::{
    game::{bot::play_turn, config::GameConfig, history::replay},
    VERSION,
};

/// Steps between progress reports.
const REPORT_INTERVAL: u32 = 200;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Ludos Engine v{}", VERSION);

    let config = load_config()?;
    demo_match(&config)
}

/// Read the config named on the command line, or fall back to defaults.
fn load_config() -> Result<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            Ok(GameConfig::from_json_str(&json)?)
        }
        None => Ok(GameConfig::default()),
    }
}

fn demo_match(config: &GameConfig) -> Result<()> {
    info!("=== Starting Demo Match ===");
    info!("Seed: {}", config.seed);
    info!("Players: {}", config.player_count);

    let mut game = config.create_game()?;
    let mut steps = 0u32;
    let mut captures = 0u32;

    while steps < config.max_turns && !game.is_game_won() {
        if let Some(capture) = play_turn(&mut game).and_then(|mv| mv.capture) {
            captures += 1;
            info!("Seat {} token {} captured", capture.seat, capture.token);
        }
        steps += 1;

        if steps % REPORT_INTERVAL == 0 {
            info!("Step {}: {}", steps, game.state());
        }
    }

    info!("=== Match Results ===");
    match game.winner() {
        Some(seat) => info!("Seat {} won after {} steps, {} captures", seat, steps, captures),
        None => info!("No winner within {} steps", config.max_turns),
    }
    info!("Final state: {}", game.state());
    info!("Wire state: {}", hex::encode(game.state().encode()));

    let hash = game.state().compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Actions recorded: {}", game.history().len());

    info!("=== Verifying Determinism ===");
    let replayed = replay(config.player_count, game.history())?;
    let replay_hash = replayed.state().compute_hash();

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("DETERMINISM FAILURE: Hashes differ!");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    Ok(())
}
