//! # Airstrike
//!
//! Vertical scrolling shooter built on [`airstrike_engine`]. The player's
//! aircraft flies up a scrolling jungle, shoots down enemy waves, collects
//! pickups and must reach the finish line alive.
//!
//! ## Quick Start
//!
//! ```rust
//! use airstrike::assets::placeholder_textures;
//! use airstrike::config::GameConfig;
//! use airstrike::world::World;
//!
//! let config = GameConfig::default();
//! let mut textures = placeholder_textures();
//! let mut world = World::new(&config, &mut textures).unwrap();
//!
//! for _ in 0..60 {
//!     world.update(config.world.time_per_update());
//! }
//! assert!(world.has_alive_player());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod data_tables;
pub mod entities;
pub mod error;
pub mod player_control;
pub mod spawn;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{GameError, Result};
