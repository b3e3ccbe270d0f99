//! Static gameplay data
//!
//! Stats for every aircraft, projectile, pickup and particle type. The
//! defaults are the stock game values; a configuration file may override any
//! of them.

use std::collections::BTreeSet;
use std::ops::Index;

use airstrike_engine::assets::TextureId;
use airstrike_engine::foundation::math::Rect;
use airstrike_engine::render::Color;
use serde::{Deserialize, Serialize};

/// Aircraft types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AircraftType {
    /// Player aircraft
    Eagle,
    /// Light enemy, does not shoot
    Raptor,
    /// Heavy enemy with a gun
    Avenger,
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectileType {
    /// Bullet fired by the player's side
    AlliedBullet,
    /// Bullet fired by enemies
    EnemyBullet,
    /// Guided missile fired by the player
    Missile,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PickupType {
    /// Restores hit points
    HealthRefill,
    /// Adds missiles
    MissileRefill,
    /// Widens the bullet spread
    FireSpread,
    /// Shortens the fire interval
    FireRate,
}

impl PickupType {
    /// Every pickup type
    pub const ALL: [Self; 4] = [Self::HealthRefill, Self::MissileRefill, Self::FireSpread, Self::FireRate];
}

/// Particle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticleType {
    /// Missile exhaust flame
    Propellant,
    /// Missile smoke trail
    Smoke,
}

impl ParticleType {
    /// Every particle type
    pub const ALL: [Self; 2] = [Self::Propellant, Self::Smoke];
}

/// One leg of a movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Heading in degrees relative to straight down the screen
    pub angle: f32,
    /// Distance to travel before turning to the next leg
    pub distance: f32,
}

impl Direction {
    /// Create a leg
    pub const fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

/// Aircraft stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    /// Starting hit points
    pub hit_points: i32,
    /// Maximum speed in units per second
    pub speed: f32,
    /// Sprite sheet
    pub texture: TextureId,
    /// Sprite region; the two roll frames follow it to the right
    pub texture_rect: Rect,
    /// Seconds between shots at fire rate level 0; zero disables the gun
    pub fire_interval: f32,
    /// Whether the sprite shows roll frames while moving sideways
    pub has_roll_animation: bool,
    /// Missiles carried at spawn
    pub missile_ammo: u32,
    /// Movement pattern, repeated; empty for free movement
    pub directions: Vec<Direction>,
}

/// Projectile stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileData {
    /// Hit points removed on impact
    pub damage: i32,
    /// Speed in units per second
    pub speed: f32,
    /// Sprite sheet
    pub texture: TextureId,
    /// Sprite region
    pub texture_rect: Rect,
}

/// What a pickup does to the aircraft collecting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupEffect {
    /// Add hit points
    Repair(i32),
    /// Add missiles
    CollectMissiles(u32),
    /// Raise the spread level by one
    IncreaseFireSpread,
    /// Raise the fire rate level by one
    IncreaseFireRate,
}

/// Pickup stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupData {
    /// Effect applied on collection
    pub effect: PickupEffect,
    /// Sprite sheet
    pub texture: TextureId,
    /// Sprite region
    pub texture_rect: Rect,
}

/// Particle stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleData {
    /// Tint
    pub color: Color,
    /// Seconds a particle lives
    pub lifetime: f32,
}

/// Explosion animation played by destroyed aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionData {
    /// Animation sheet
    pub texture: TextureId,
    /// Frame width in pixels
    pub frame_width: f32,
    /// Frame height in pixels
    pub frame_height: f32,
    /// Number of frames
    pub num_frames: u32,
    /// Frames per row of the sheet
    pub columns: u32,
    /// Seconds for the whole animation
    pub duration: f32,
}

/// Aircraft stats by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftTable {
    /// Eagle stats
    pub eagle: AircraftData,
    /// Raptor stats
    pub raptor: AircraftData,
    /// Avenger stats
    pub avenger: AircraftData,
}

impl Index<AircraftType> for AircraftTable {
    type Output = AircraftData;

    fn index(&self, kind: AircraftType) -> &AircraftData {
        match kind {
            AircraftType::Eagle => &self.eagle,
            AircraftType::Raptor => &self.raptor,
            AircraftType::Avenger => &self.avenger,
        }
    }
}

/// Projectile stats by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTable {
    /// Allied bullet stats
    pub allied_bullet: ProjectileData,
    /// Enemy bullet stats
    pub enemy_bullet: ProjectileData,
    /// Missile stats
    pub missile: ProjectileData,
}

impl Index<ProjectileType> for ProjectileTable {
    type Output = ProjectileData;

    fn index(&self, kind: ProjectileType) -> &ProjectileData {
        match kind {
            ProjectileType::AlliedBullet => &self.allied_bullet,
            ProjectileType::EnemyBullet => &self.enemy_bullet,
            ProjectileType::Missile => &self.missile,
        }
    }
}

/// Pickup stats by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupTable {
    /// Health refill stats
    pub health_refill: PickupData,
    /// Missile refill stats
    pub missile_refill: PickupData,
    /// Fire spread stats
    pub fire_spread: PickupData,
    /// Fire rate stats
    pub fire_rate: PickupData,
}

impl Index<PickupType> for PickupTable {
    type Output = PickupData;

    fn index(&self, kind: PickupType) -> &PickupData {
        match kind {
            PickupType::HealthRefill => &self.health_refill,
            PickupType::MissileRefill => &self.missile_refill,
            PickupType::FireSpread => &self.fire_spread,
            PickupType::FireRate => &self.fire_rate,
        }
    }
}

/// Particle stats by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleTable {
    /// Propellant stats
    pub propellant: ParticleData,
    /// Smoke stats
    pub smoke: ParticleData,
}

impl Index<ParticleType> for ParticleTable {
    type Output = ParticleData;

    fn index(&self, kind: ParticleType) -> &ParticleData {
        match kind {
            ParticleType::Propellant => &self.propellant,
            ParticleType::Smoke => &self.smoke,
        }
    }
}

/// Every gameplay table, injected into the world and the nodes it builds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTables {
    /// Aircraft stats
    pub aircraft: AircraftTable,
    /// Projectile stats
    pub projectiles: ProjectileTable,
    /// Pickup stats
    pub pickups: PickupTable,
    /// Particle stats
    pub particles: ParticleTable,
    /// Explosion animation
    pub explosion: ExplosionData,
}

impl DataTables {
    /// Every texture the tables refer to
    pub fn textures(&self) -> BTreeSet<TextureId> {
        let aircraft = [&self.aircraft.eagle, &self.aircraft.raptor, &self.aircraft.avenger];
        let projectiles = [
            &self.projectiles.allied_bullet,
            &self.projectiles.enemy_bullet,
            &self.projectiles.missile,
        ];

        aircraft
            .iter()
            .map(|data| data.texture)
            .chain(projectiles.iter().map(|data| data.texture))
            .chain(PickupType::ALL.iter().map(|&kind| self.pickups[kind].texture))
            .chain(std::iter::once(self.explosion.texture))
            .collect()
    }
}

impl Default for DataTables {
    fn default() -> Self {
        let bullet = ProjectileData {
            damage: 10,
            speed: 300.0,
            texture: TextureId::Entities,
            texture_rect: Rect::new(175.0, 64.0, 3.0, 14.0),
        };
        let pickup = |effect, left| PickupData {
            effect,
            texture: TextureId::Entities,
            texture_rect: Rect::new(left, 64.0, 40.0, 40.0),
        };

        Self {
            aircraft: AircraftTable {
                eagle: AircraftData {
                    hit_points: 100,
                    speed: 200.0,
                    texture: TextureId::Entities,
                    texture_rect: Rect::new(0.0, 0.0, 48.0, 64.0),
                    fire_interval: 1.0,
                    has_roll_animation: true,
                    missile_ammo: 2,
                    directions: Vec::new(),
                },
                raptor: AircraftData {
                    hit_points: 20,
                    speed: 80.0,
                    texture: TextureId::Entities,
                    texture_rect: Rect::new(144.0, 0.0, 84.0, 64.0),
                    fire_interval: 0.0,
                    has_roll_animation: false,
                    missile_ammo: 0,
                    directions: vec![
                        Direction::new(45.0, 80.0),
                        Direction::new(-45.0, 160.0),
                        Direction::new(45.0, 80.0),
                    ],
                },
                avenger: AircraftData {
                    hit_points: 40,
                    speed: 50.0,
                    texture: TextureId::Entities,
                    texture_rect: Rect::new(228.0, 0.0, 60.0, 59.0),
                    fire_interval: 2.0,
                    has_roll_animation: false,
                    missile_ammo: 0,
                    directions: vec![
                        Direction::new(45.0, 50.0),
                        Direction::new(0.0, 50.0),
                        Direction::new(-45.0, 100.0),
                        Direction::new(0.0, 50.0),
                        Direction::new(45.0, 50.0),
                    ],
                },
            },
            projectiles: ProjectileTable {
                allied_bullet: bullet.clone(),
                enemy_bullet: bullet,
                missile: ProjectileData {
                    damage: 200,
                    speed: 200.0,
                    texture: TextureId::Entities,
                    texture_rect: Rect::new(160.0, 64.0, 15.0, 24.0),
                },
            },
            pickups: PickupTable {
                health_refill: pickup(PickupEffect::Repair(25), 0.0),
                missile_refill: pickup(PickupEffect::CollectMissiles(3), 40.0),
                fire_spread: pickup(PickupEffect::IncreaseFireSpread, 80.0),
                fire_rate: pickup(PickupEffect::IncreaseFireRate, 120.0),
            },
            particles: ParticleTable {
                propellant: ParticleData {
                    color: Color::rgb(255, 255, 50),
                    lifetime: 0.6,
                },
                smoke: ParticleData {
                    color: Color::rgb(50, 50, 50),
                    lifetime: 4.0,
                },
            },
            explosion: ExplosionData {
                texture: TextureId::Explosion,
                frame_width: 256.0,
                frame_height: 256.0,
                num_frames: 16,
                columns: 4,
                duration: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let tables = DataTables::default();

        assert_eq!(tables.aircraft[AircraftType::Eagle].hit_points, 100);
        assert_eq!(tables.aircraft[AircraftType::Raptor].directions.len(), 3);
        assert_eq!(tables.aircraft[AircraftType::Avenger].directions.len(), 5);
        assert_eq!(tables.projectiles[ProjectileType::EnemyBullet].damage, 10);
        assert_eq!(tables.projectiles[ProjectileType::Missile].damage, 200);
        assert_eq!(tables.pickups[PickupType::HealthRefill].effect, PickupEffect::Repair(25));
        assert!((tables.particles[ParticleType::Smoke].lifetime - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_referenced_textures() {
        let textures = DataTables::default().textures();
        assert_eq!(
            textures.into_iter().collect::<Vec<_>>(),
            vec![TextureId::Entities, TextureId::Explosion]
        );
    }
}
