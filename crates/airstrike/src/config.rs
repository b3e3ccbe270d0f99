//! Game configuration
//!
//! Everything the world needs that is not code: view and world geometry,
//! pacing, the data tables and the wave table. Missing fields in a file fall
//! back to the stock values.

use airstrike_engine::config::Config;
use airstrike_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::data_tables::DataTables;
use crate::error::{GameError, Result};
use crate::spawn::{default_waves, WaveEntry};

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World geometry and pacing
    pub world: WorldConfig,
    /// Gameplay tables
    pub tables: DataTables,
    /// Enemy waves relative to the player's spawn position
    pub waves: Vec<WaveEntry>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tables: DataTables::default(),
            waves: default_waves(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Check value ranges the world relies on
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        if let Some(wave) = self.waves.iter().find(|wave| !wave.x.is_finite() || !wave.y.is_finite()) {
            return Err(GameError::InvalidConfig(format!("wave entry {wave:?} is not finite")));
        }
        Ok(())
    }
}

/// World geometry and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// View width in world units
    pub view_width: f32,
    /// View height in world units
    pub view_height: f32,
    /// Height of the scrolling world
    pub world_height: f32,
    /// Vertical view speed in units per second (negative scrolls up)
    pub scroll_speed: f32,
    /// Closest the player may get to the view's edges
    pub border_distance: f32,
    /// Extra space above the view where enemies spawn and projectiles survive
    pub battlefield_margin: f32,
    /// Player speed per held direction key
    pub player_speed: f32,
    /// Simulation updates per second
    pub updates_per_second: f32,
    /// Chance in `[0, 1]` that a destroyed enemy drops a pickup
    pub pickup_drop_chance: f64,
    /// Outline every bounding box when drawing
    pub show_bounding_boxes: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view_width: 600.0,
            view_height: 400.0,
            world_height: 2000.0,
            scroll_speed: -50.0,
            border_distance: 40.0,
            battlefield_margin: 100.0,
            player_speed: 200.0,
            updates_per_second: 60.0,
            pickup_drop_chance: 1.0,
            show_bounding_boxes: false,
        }
    }
}

impl WorldConfig {
    /// View size as a vector
    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height)
    }

    /// Fixed simulation step in seconds
    pub fn time_per_update(&self) -> f32 {
        1.0 / self.updates_per_second
    }

    /// Check value ranges the world relies on
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Err(GameError::InvalidConfig(reason.to_string()));

        if !(self.view_width > 0.0 && self.view_height > 0.0) {
            return invalid("view size must be positive");
        }
        if self.world_height < self.view_height {
            return invalid("world must be at least as tall as the view");
        }
        if self.border_distance < 0.0 || 2.0 * self.border_distance >= self.view_width.min(self.view_height) {
            return invalid("border distance must leave room inside the view");
        }
        if !(self.updates_per_second > 0.0) {
            return invalid("updates per second must be positive");
        }
        if !(0.0..=1.0).contains(&self.pickup_drop_chance) {
            return invalid("pickup drop chance must lie in [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airstrike_engine::config::ConfigFormat;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_relative_eq!(WorldConfig::default().time_per_update(), 1.0 / 60.0);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = GameConfig::from_str_as(
            "(world: (scroll_speed: -80.0, pickup_drop_chance: 0.25), waves: [])",
            ConfigFormat::Ron,
        )
        .unwrap();

        assert_relative_eq!(config.world.scroll_speed, -80.0);
        assert_relative_eq!(config.world.view_width, 600.0);
        assert!(config.waves.is_empty());
        assert_eq!(config.tables, DataTables::default());
    }

    #[test]
    fn test_toml_world_section() {
        let config = GameConfig::from_str_as("[world]\nview_width = 800.0\n", ConfigFormat::Toml).unwrap();

        assert_relative_eq!(config.world.view_width, 800.0);
        assert_eq!(config.waves.len(), default_waves().len());
    }

    #[test]
    fn test_config_survives_ron_text() {
        let config = GameConfig::default();
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        assert_eq!(GameConfig::from_str_as(&text, ConfigFormat::Ron).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = GameConfig::default();
        config.world.pickup_drop_chance = 1.5;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.world.world_height = 100.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.waves[0].y = f32::NAN;
        assert!(config.validate().is_err());
    }
}
