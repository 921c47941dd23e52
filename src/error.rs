//! Centralized error types for the simulation.
//!
//! Every failure the core can report happens at startup (assets, configuration);
//! once the frame loop runs, all per-frame edge cases are absorbed by invariants.

use std::io;
use std::path::PathBuf;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<figment::Error> for GameError {
    fn from(e: figment::Error) -> Self {
        GameError::Config(e.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Errors related to sprite and background images.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {}: {reason}", path.display())]
    LoadFailed { path: PathBuf, reason: String },

    #[error("Invalid texture format: {0}")]
    InvalidFormat(String),

    #[error("Texture has no pixels: {0}x{1}")]
    Empty(u32, u32),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
