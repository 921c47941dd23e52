#![allow(dead_code)]

use std::rc::Rc;

use glam::{IVec2, UVec2};
use horde::asset::Assets;
use horde::clock::Millis;
use horde::config::GameConfig;
use horde::entity::{Body, Bullet, Faction, Player, Playfield, ShotTemplate, Tick};
use horde::occupancy::OccupancyMap;
use horde::render::{Background, Canvas, DigitFont, FrameBuffer};
use horde::spawner::Prototypes;
use horde::texture::{Pixel, Sprite};
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const WHITE: Pixel = Pixel {
    r: 0xff,
    g: 0xff,
    b: 0xff,
    a: 0xff,
};

/// A fully opaque white rectangle.
pub fn block(width: u32, height: u32) -> Sprite {
    Sprite::from_pixels(width, height, vec![WHITE; (width * height) as usize]).unwrap()
}

pub fn shared_block(width: u32, height: u32) -> Rc<Sprite> {
    Rc::new(block(width, height))
}

/// A sprite whose visible pixels all differ, so moved pixels can be told apart.
pub fn gradient(width: u32, height: u32) -> Sprite {
    let pixels = (0..width * height)
        .map(|i| Pixel::new((i % 250 + 1) as u8, (i / 250) as u8, 0x40, 0xff))
        .collect();
    Sprite::from_pixels(width, height, pixels).unwrap()
}

pub fn field(width: u32, height: u32) -> Playfield {
    Playfield::new(UVec2::new(width, height))
}

pub fn tick(now: Millis, target: IVec2, field: Playfield) -> Tick {
    Tick { now, target, field }
}

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

pub fn body(position: IVec2, sprite: Rc<Sprite>, health: f64, update_ms: Millis) -> Body {
    Body::new(position, sprite, health, 10, update_ms)
}

pub fn shot(speed: f64, damage: f64) -> ShotTemplate {
    ShotTemplate {
        sprite: shared_block(3, 3),
        speed,
        damage,
        update_ms: 0,
    }
}

pub fn bullet(position: IVec2, direction: glam::DVec2, speed: f64, faction: Faction) -> Bullet {
    shot(speed, 2.0).fire(position, direction, faction)
}

pub fn player_at(position: IVec2) -> Player {
    let config = GameConfig::default();
    Player::new(position, block(5, 5), &config.player, shot(15.0, 2.0))
}

pub fn prototypes() -> Prototypes {
    Prototypes {
        chaser: shared_block(6, 6),
        bouncer: shared_block(8, 8),
        shooter: shared_block(7, 5),
        hostile_shot: shared_block(3, 3),
        health_pickup: shared_block(5, 5),
        damage_pickup: shared_block(5, 5),
    }
}

pub fn font() -> DigitFont {
    DigitFont::new(std::array::from_fn(|_| block(3, 5)))
}

pub const BACKGROUND_COLOR: u32 = 0x20_40_60;

pub fn assets(screen: UVec2) -> Assets {
    Assets {
        background: Background::solid(BACKGROUND_COLOR, screen),
        player: block(5, 5),
        player_shot: shared_block(3, 3),
        prototypes: prototypes(),
        font: font(),
    }
}

/// A small deterministic configuration with spawning effectively disabled.
pub fn quiet_config(screen: UVec2) -> GameConfig {
    let mut config = GameConfig::default();
    config.screen.width = screen.x;
    config.screen.height = screen.y;
    config.seed = Some(7);
    config.spawner.initial_spawn_chance = 0.0;
    config.spawner.spawn_chance_step = 0.0;
    config
}

/// Owns a frame and an occupancy map of the same size.
pub struct Surface {
    pub frame: FrameBuffer,
    pub occupancy: OccupancyMap,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        let size = UVec2::new(width, height);
        Self {
            frame: FrameBuffer::new(size),
            occupancy: OccupancyMap::new(size),
        }
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.frame, &mut self.occupancy)
    }
}
