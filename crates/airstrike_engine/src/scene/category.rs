//! Node categories used for command filtering and collision resolution

use bitflags::bitflags;

bitflags! {
    /// Bitmask tag identifying a node's gameplay role.
    ///
    /// Commands carry a mask of the categories they address; a node receives a
    /// command when its own category intersects that mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Category: u32 {
        /// Layer that receives spawned projectiles and pickups
        const AIR_SCENE_LAYER = 1 << 0;
        /// The player's aircraft
        const PLAYER_AIRCRAFT = 1 << 1;
        /// Aircraft flying with the player
        const ALLIED_AIRCRAFT = 1 << 2;
        /// Hostile aircraft
        const ENEMY_AIRCRAFT = 1 << 3;
        /// Collectible pickups
        const PICKUP = 1 << 4;
        /// Bullets and missiles fired by the player's side
        const ALLIED_PROJECTILE = 1 << 5;
        /// Bullets fired by enemies
        const ENEMY_PROJECTILE = 1 << 6;
        /// Particle containers
        const PARTICLE_SYSTEM = 1 << 7;

        /// Any aircraft
        const AIRCRAFT = Self::PLAYER_AIRCRAFT.bits() | Self::ALLIED_AIRCRAFT.bits() | Self::ENEMY_AIRCRAFT.bits();
        /// Any projectile
        const PROJECTILE = Self::ALLIED_PROJECTILE.bits() | Self::ENEMY_PROJECTILE.bits();
    }
}

impl Category {
    /// Category of plain grouping nodes; never matches a command
    pub const NONE: Self = Self::empty();

    /// Check whether a node of category `self` is addressed by `mask`
    pub fn matches(self, mask: Self) -> bool {
        self.intersects(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_masks() {
        assert!(Category::PLAYER_AIRCRAFT.matches(Category::AIRCRAFT));
        assert!(Category::ENEMY_AIRCRAFT.matches(Category::AIRCRAFT));
        assert!(!Category::PICKUP.matches(Category::AIRCRAFT));
        assert!(Category::ENEMY_PROJECTILE.matches(Category::PROJECTILE));
    }

    #[test]
    fn test_none_never_matches() {
        assert!(!Category::NONE.matches(Category::all()));
        assert!(!Category::PICKUP.matches(Category::NONE));
    }
}
