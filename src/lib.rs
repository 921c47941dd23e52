//! Simulation core for a pixel-buffer "survive the horde" arcade shooter.
//!
//! The host owns the window and the clock. Each frame it calls [`game::Game::update`]
//! with the current time and an [`input::Input`] snapshot, then [`game::Game::render`]
//! into a [`render::FrameBuffer`] it presents however it likes.

pub mod asset;
pub mod clock;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod game;
pub mod input;
pub mod logging;
pub mod occupancy;
pub mod registry;
pub mod render;
pub mod spawner;
pub mod texture;
