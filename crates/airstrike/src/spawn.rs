//! Enemy spawn table
//!
//! Waves are authored relative to the player's spawn position: `x` is a
//! sideways offset and `y` the distance ahead. The table converts them to
//! world positions once and hands them out nearest first as the battlefield
//! scrolls over them.

use airstrike_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::data_tables::AircraftType;

/// Wave entry relative to the player's spawn position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Aircraft to spawn
    pub kind: AircraftType,
    /// Sideways offset from the spawn position
    pub x: f32,
    /// Distance ahead of the spawn position
    pub y: f32,
}

impl WaveEntry {
    /// Create an entry
    pub const fn new(kind: AircraftType, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

/// Enemy waiting to enter the battlefield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    /// Aircraft to spawn
    pub kind: AircraftType,
    /// World x
    pub x: f32,
    /// World y
    pub y: f32,
}

/// Pending spawn points, consumed highest world y first
#[derive(Debug, Clone, Default)]
pub struct SpawnTable {
    // Ascending y, so the next due point is at the back
    points: Vec<SpawnPoint>,
}

impl SpawnTable {
    /// Convert `waves` to world positions around `spawn_position`
    pub fn from_waves(spawn_position: Vec2, waves: &[WaveEntry]) -> Self {
        let mut points: Vec<SpawnPoint> = waves
            .iter()
            .map(|wave| SpawnPoint {
                kind: wave.kind,
                x: spawn_position.x + wave.x,
                y: spawn_position.y - wave.y,
            })
            .collect();
        points.sort_by(|a, b| a.y.total_cmp(&b.y));

        Self { points }
    }

    /// Take the next point if it lies below `battlefield_top`
    pub fn pop_due(&mut self, battlefield_top: f32) -> Option<SpawnPoint> {
        if self.points.last()?.y > battlefield_top {
            self.points.pop()
        } else {
            None
        }
    }

    /// Next point to be spawned
    pub fn peek(&self) -> Option<&SpawnPoint> {
        self.points.last()
    }

    /// Number of pending points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether every point has been spawned
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The stock wave table
pub fn default_waves() -> Vec<WaveEntry> {
    use AircraftType::{Avenger, Raptor};

    vec![
        WaveEntry::new(Raptor, -250.0, 200.0),
        WaveEntry::new(Raptor, 0.0, 200.0),
        WaveEntry::new(Raptor, 250.0, 200.0),
        WaveEntry::new(Raptor, -250.0, 600.0),
        WaveEntry::new(Raptor, 0.0, 600.0),
        WaveEntry::new(Raptor, 250.0, 600.0),
        WaveEntry::new(Avenger, -70.0, 400.0),
        WaveEntry::new(Avenger, 70.0, 400.0),
        WaveEntry::new(Avenger, -70.0, 800.0),
        WaveEntry::new(Avenger, 70.0, 800.0),
        WaveEntry::new(Avenger, -120.0, 850.0),
        WaveEntry::new(Avenger, 120.0, 850.0),
        WaveEntry::new(Raptor, -250.0, 900.0),
        WaveEntry::new(Raptor, 0.0, 900.0),
        WaveEntry::new(Raptor, 250.0, 900.0),
        WaveEntry::new(Raptor, -250.0, 950.0),
        WaveEntry::new(Raptor, 0.0, 950.0),
        WaveEntry::new(Raptor, 250.0, 1000.0),
        WaveEntry::new(Avenger, -70.0, 1050.0),
        WaveEntry::new(Avenger, 70.0, 1100.0),
        WaveEntry::new(Avenger, -70.0, 1200.0),
        WaveEntry::new(Avenger, 70.0, 1250.0),
        WaveEntry::new(Avenger, -120.0, 1250.0),
        WaveEntry::new(Avenger, 120.0, 1300.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_come_out_nearest_first() {
        let waves = [
            WaveEntry::new(AircraftType::Raptor, 0.0, 600.0),
            WaveEntry::new(AircraftType::Avenger, 10.0, 200.0),
            WaveEntry::new(AircraftType::Raptor, 20.0, 900.0),
        ];
        let mut table = SpawnTable::from_waves(Vec2::new(300.0, 1800.0), &waves);

        let mut order = Vec::new();
        while let Some(point) = table.pop_due(f32::NEG_INFINITY) {
            order.push(point.y);
        }
        assert_eq!(order, vec![1600.0, 1200.0, 900.0]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_only_points_inside_battlefield_are_due() {
        let waves = [
            WaveEntry::new(AircraftType::Raptor, -250.0, 200.0),
            WaveEntry::new(AircraftType::Raptor, 250.0, 200.0),
            WaveEntry::new(AircraftType::Raptor, 0.0, 600.0),
        ];
        let mut table = SpawnTable::from_waves(Vec2::new(300.0, 1800.0), &waves);

        assert!(table.pop_due(1700.0).is_none());

        let first = table.pop_due(1500.0).unwrap();
        let second = table.pop_due(1500.0).unwrap();
        assert_eq!((first.y, second.y), (1600.0, 1600.0));
        assert_eq!(first.x + second.x, 600.0);
        assert!(table.pop_due(1500.0).is_none());
        assert_eq!(table.peek().map(|point| point.y), Some(1200.0));
    }

    #[test]
    fn test_default_waves_stay_on_the_map() {
        assert!(default_waves().iter().all(|wave| wave.y <= 1300.0));
        assert_eq!(default_waves().len(), 24);
    }
}
