//! Game-level errors

use airstrike_engine::assets::ResourceError;
use airstrike_engine::config::ConfigError;
use airstrike_engine::scene::SceneError;
use thiserror::Error;

/// Errors raised while setting up or running the game
#[derive(Debug, Error)]
pub enum GameError {
    /// Scene graph precondition violated
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Texture missing or unreadable
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Configuration file unreadable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;
