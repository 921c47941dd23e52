//! Headless host: runs the simulation at 60 Hz with scripted input and logs how it went.
//!
//! Usage: `horde [frames]`. Configuration is read from `horde.toml` and `HORDE_*` variables.

use std::time::Instant;

use anyhow::Context;
use glam::IVec2;
use tracing::{debug, info};

use horde::asset::Assets;
use horde::config::{GameConfig, CONFIG_FILE};
use horde::constants::LOOP_TIME;
use horde::formatter;
use horde::game::Game;
use horde::input::{Input, Keys};
use horde::logging::setup_logging;

/// One minute of play.
const DEFAULT_FRAMES: u64 = 3_600;

/// Frames spent walking in one direction before turning.
const WALK_FRAMES: u64 = 90;

const WALK_CYCLE: [Keys; 4] = [Keys::LEFT, Keys::UP, Keys::RIGHT, Keys::DOWN];

/// Walks in a slow square and fires at whatever hostile is closest.
fn scripted_input(game: &Game, frame: u64) -> Input {
    let keys = WALK_CYCLE[((frame / WALK_FRAMES) % WALK_CYCLE.len() as u64) as usize];
    match game.nearest_hostile() {
        Some(target) => Input::new(keys, target, true),
        None => Input::new(keys, game.player().position() + IVec2::new(0, -1), false),
    }
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let frames = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>().with_context(|| format!("invalid frame count {arg:?}"))?,
        None => DEFAULT_FRAMES,
    };

    let config = GameConfig::load(CONFIG_FILE).context("loading configuration")?;
    let assets = Assets::load(&config.assets, config.screen.size()).context("loading assets")?;

    let clock = Instant::now();
    let mut game = Game::new(&config, assets, 0);
    let mut buffer = game.new_frame();
    info!(frames, "Starting headless run");

    for frame in 0..frames {
        let started = Instant::now();
        let now = clock.elapsed().as_millis() as u64;

        let input = scripted_input(&game, frame);
        game.update(now, &input);
        game.render(&mut buffer);
        formatter::advance_frame();

        if frame % 600 == 0 {
            debug!(
                score = game.score(),
                health = game.player().health(),
                hostiles = game.registry().hostiles().live(),
                projectiles = game.registry().projectiles().live(),
                difficulty = game.spawner().difficulty(),
                "Status"
            );
        }
        if game.quit_requested() || game.is_over() {
            break;
        }

        if let Some(remaining) = LOOP_TIME.checked_sub(started.elapsed()) {
            spin_sleep::sleep(remaining);
        }
    }

    info!(
        score = game.score(),
        survived = !game.is_over(),
        elapsed_ms = clock.elapsed().as_millis() as u64,
        "Run finished"
    );
    Ok(())
}
