//! The fixed set of images a run needs, loaded from the asset directory at startup.
//!
//! Every file is checked before any is decoded, so a broken install fails before the
//! frame loop starts and reports the first missing path.

use std::path::Path;
use std::rc::Rc;

use glam::UVec2;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, info};

use crate::constants::SPRITE_ALPHA;
use crate::error::{AssetError, GameResult, TextureError};
use crate::render::{Background, DigitFont};
use crate::spawner::Prototypes;
use crate::texture::Sprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum Asset {
    Background,
    Player,
    PlayerShot,
    Chaser,
    Bouncer,
    Shooter,
    HostileShot,
    HealthPickup,
    DamagePickup,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
}

impl Asset {
    pub const DIGITS: [Asset; 10] = [
        Asset::Digit0,
        Asset::Digit1,
        Asset::Digit2,
        Asset::Digit3,
        Asset::Digit4,
        Asset::Digit5,
        Asset::Digit6,
        Asset::Digit7,
        Asset::Digit8,
        Asset::Digit9,
    ];

    /// Path relative to the asset directory.
    pub fn path(&self) -> &'static str {
        match self {
            Asset::Background => "background.png",
            Asset::Player => "player.png",
            Asset::PlayerShot => "player_shot.png",
            Asset::Chaser => "chaser.png",
            Asset::Bouncer => "bouncer.png",
            Asset::Shooter => "shooter.png",
            Asset::HostileShot => "hostile_shot.png",
            Asset::HealthPickup => "health.png",
            Asset::DamagePickup => "damage.png",
            Asset::Digit0 => "digits/0.png",
            Asset::Digit1 => "digits/1.png",
            Asset::Digit2 => "digits/2.png",
            Asset::Digit3 => "digits/3.png",
            Asset::Digit4 => "digits/4.png",
            Asset::Digit5 => "digits/5.png",
            Asset::Digit6 => "digits/6.png",
            Asset::Digit7 => "digits/7.png",
            Asset::Digit8 => "digits/8.png",
            Asset::Digit9 => "digits/9.png",
        }
    }
}

/// Everything decoded from the asset directory.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Background,
    pub player: Sprite,
    pub player_shot: Rc<Sprite>,
    pub prototypes: Prototypes,
    pub font: DigitFont,
}

impl Assets {
    /// Verifies and decodes every [`Asset`] under `dir`. The background is tiled to `screen`.
    pub fn load(dir: impl AsRef<Path>, screen: UVec2) -> GameResult<Self> {
        let dir = dir.as_ref();
        for asset in Asset::iter() {
            let path = dir.join(asset.path());
            if !path.is_file() {
                return Err(AssetError::NotFound(path).into());
            }
        }

        let load = |asset: Asset| Sprite::load(dir.join(asset.path()), SPRITE_ALPHA);
        let tight = |asset: Asset| -> Result<Rc<Sprite>, TextureError> {
            let mut sprite = load(asset)?;
            sprite.tighten();
            Ok(Rc::new(sprite))
        };

        let prototypes = Prototypes {
            chaser: tight(Asset::Chaser)?,
            bouncer: tight(Asset::Bouncer)?,
            shooter: tight(Asset::Shooter)?,
            hostile_shot: Rc::new(load(Asset::HostileShot)?),
            health_pickup: tight(Asset::HealthPickup)?,
            damage_pickup: tight(Asset::DamagePickup)?,
        };

        let mut digits = Vec::with_capacity(Asset::DIGITS.len());
        for asset in Asset::DIGITS {
            digits.push(load(asset)?);
        }
        let digits: [Sprite; 10] = digits
            .try_into()
            .map_err(|_| TextureError::InvalidFormat("expected ten digit sprites".into()))?;

        let assets = Self {
            background: Background::load(dir.join(Asset::Background.path()), screen)?,
            player: load(Asset::Player)?,
            player_shot: Rc::new(load(Asset::PlayerShot)?),
            prototypes,
            font: DigitFont::new(digits),
        };
        debug!(count = Asset::iter().count(), "Assets decoded");
        info!(dir = %dir.display(), "Assets loaded");
        Ok(assets)
    }
}
