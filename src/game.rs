//! The simulation the host drives: one `update` and one `render` per frame.

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::asset::Assets;
use crate::clock::Millis;
use crate::config::GameConfig;
use crate::entity::{Player, Playfield, ShotTemplate, Tick};
use crate::input::Input;
use crate::occupancy::OccupancyMap;
use crate::registry::Registry;
use crate::render::hud::{draw_final_score, draw_stats};
use crate::render::{Background, Canvas, DigitFont, FrameBuffer, Stats};
use crate::spawner::Spawner;

/// How much of the background survives on the death screen, out of 255.
const DEATH_DIM: u8 = 0x50;

pub struct Game {
    field: Playfield,
    player: Player,
    registry: Registry,
    spawner: Spawner,
    background: Background,
    death_background: Background,
    font: DigitFont,
    occupancy: OccupancyMap,
    rng: SmallRng,
    score: u64,
    quit: bool,
}

impl Game {
    /// Builds a run from decoded assets. `start` is the host clock at creation.
    pub fn new(config: &GameConfig, assets: Assets, start: Millis) -> Self {
        let field = Playfield::new(config.screen.size());
        let shot = ShotTemplate {
            sprite: assets.player_shot,
            speed: config.bullet.speed,
            damage: config.player.damage as f64,
            update_ms: config.bullet.update_ms,
        };
        let player = Player::new(field.center(), assets.player, &config.player, shot);
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(width = field.size.x, height = field.size.y, seed = ?config.seed, "Game created");
        Self {
            field,
            player,
            registry: Registry::new(config.registry.compact_threshold),
            spawner: Spawner::new(config, assets.prototypes, start),
            death_background: assets.background.dimmed(DEATH_DIM),
            background: assets.background,
            font: assets.font,
            occupancy: OccupancyMap::new(config.screen.size()),
            rng,
            score: 0,
            quit: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    pub fn field(&self) -> Playfield {
        self.field
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// True once the quit key was seen; the host should stop after this frame.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// True once the player has died. The simulation is frozen from then on.
    pub fn is_over(&self) -> bool {
        self.player.is_dead()
    }

    /// Applies input, advances every entity and maybe spawns something new.
    pub fn update(&mut self, now: Millis, input: &Input) {
        if input.quit() && !self.quit {
            info!(score = self.score, "Quit requested");
            self.quit = true;
        }
        if self.is_over() {
            return;
        }

        self.player.set_step(input.step());
        self.player.aim_at(input.cursor);
        if input.fire {
            if let Some(bullet) = self.player.fire(now) {
                self.registry.add_projectile(bullet);
            }
        }
        self.player.update(now, &self.field);

        let tick = Tick {
            now,
            target: self.player.position(),
            field: self.field,
        };
        let live = self.registry.update(&tick, &mut self.rng);
        self.registry.collect_reward(&mut self.player);

        if let Some(entity) = self.spawner.update(now, live, &mut self.rng) {
            self.registry.spawn(entity);
        }
    }

    /// Composites the frame and resolves this frame's collisions.
    pub fn render(&mut self, frame: &mut FrameBuffer) {
        if self.is_over() {
            frame.copy_from(&self.death_background);
            draw_final_score(frame, &self.font, self.score);
            return;
        }

        self.occupancy.clear();
        frame.copy_from(&self.background);

        let mut canvas = Canvas::new(frame, &mut self.occupancy);
        let gained = self.registry.draw(&mut canvas);
        if gained > 0 {
            self.score += gained;
            debug!(gained, score = self.score, "Score increased");
        }
        self.player.draw(&mut canvas);
        if self.player.is_dead() {
            info!(score = self.score, "Game over");
        }

        draw_stats(
            frame,
            &self.font,
            Stats {
                score: self.score,
                health: self.player.health(),
                damage: self.player.damage(),
            },
        );
    }

    /// A frame buffer matching this game's screen.
    pub fn new_frame(&self) -> FrameBuffer {
        FrameBuffer::new(self.field.size)
    }

    /// Center of the live hostile closest to the player.
    pub fn nearest_hostile(&self) -> Option<IVec2> {
        let from = self.player.position();
        self.registry
            .hostiles()
            .iter()
            .filter(|hostile| !hostile.is_dead())
            .map(|hostile| hostile.position())
            .min_by_key(|position| (*position - from).length_squared())
    }
}
