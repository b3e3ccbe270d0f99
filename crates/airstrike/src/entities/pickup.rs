//! Pickup node

use airstrike_engine::foundation::math::{Rect, Transform2D};
use airstrike_engine::render::{RenderStates, RenderTarget, Sprite};
use airstrike_engine::scene::{Category, Entity, NodeBehavior};

use super::aircraft::Aircraft;
use crate::data_tables::{DataTables, PickupEffect, PickupType};

/// Collectible upgrade
#[derive(Debug, Clone)]
pub struct Pickup {
    kind: PickupType,
    entity: Entity,
    sprite: Sprite,
    effect: PickupEffect,
}

impl Pickup {
    /// Pickup of `kind`
    pub fn new(kind: PickupType, tables: &DataTables) -> Self {
        let data = &tables.pickups[kind];
        let mut sprite = Sprite::new(data.texture, data.texture_rect);
        sprite.center_origin();

        Self {
            kind,
            entity: Entity::new(1),
            sprite,
            effect: data.effect,
        }
    }

    /// Pickup type
    pub fn kind(&self) -> PickupType {
        self.kind
    }

    /// Effect applied on collection
    pub fn effect(&self) -> PickupEffect {
        self.effect
    }
}

impl PickupEffect {
    /// Apply the effect to `aircraft`
    pub fn apply(self, aircraft: &mut Aircraft) {
        match self {
            Self::Repair(points) => aircraft.repair(points),
            Self::CollectMissiles(count) => aircraft.collect_missiles(count),
            Self::IncreaseFireSpread => aircraft.increase_fire_spread(),
            Self::IncreaseFireRate => aircraft.increase_fire_rate(),
        }
    }
}

impl NodeBehavior for Pickup {
    fn category(&self) -> Category {
        Category::PICKUP
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        target.draw_sprite(&self.sprite, states);
    }

    fn bounding_box(&self, world: &Transform2D) -> Rect {
        world.transform_rect(&self.sprite.global_bounds())
    }

    fn entity(&self) -> Option<&Entity> {
        Some(&self.entity)
    }

    fn entity_mut(&mut self) -> Option<&mut Entity> {
        Some(&mut self.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_tables::AircraftType;
    use std::rc::Rc;

    #[test]
    fn test_effects_apply_to_aircraft() {
        let tables = Rc::new(DataTables::default());
        let mut aircraft = Aircraft::new(AircraftType::Eagle, Rc::clone(&tables));
        aircraft.entity_mut().unwrap().damage(50);

        for kind in PickupType::ALL {
            Pickup::new(kind, &tables).effect().apply(&mut aircraft);
        }

        assert_eq!(aircraft.hit_points(), 75);
        assert_eq!(aircraft.missile_ammo(), 5);
        assert_eq!(aircraft.fire_spread_level(), 2);
        assert_eq!(aircraft.fire_rate_level(), 2);
    }

    #[test]
    fn test_bounding_box_is_centred() {
        let pickup = Pickup::new(PickupType::FireRate, &DataTables::default());
        let bounds = pickup.bounding_box(&Transform2D::from_translation(airstrike_engine::foundation::math::Vec2::new(
            100.0, 100.0,
        )));

        assert_eq!(bounds, Rect::new(80.0, 80.0, 40.0, 40.0));
    }
}
