//! Whole-world scenarios driven through the tick pipeline

mod world_tick;

use std::rc::Rc;

use airstrike_engine::foundation::math::Vec2;
use airstrike_engine::scene::{NodeBehavior, NodeId, NodeTree};

use crate::assets::placeholder_textures;
use crate::config::GameConfig;
use crate::data_tables::{AircraftType, PickupType, ProjectileType};
use crate::entities::{Aircraft, Pickup, Projectile};
use crate::world::World;

pub const DT: f32 = 1.0 / 60.0;

/// World without scheduled enemies
pub fn quiet_world() -> World {
    let config = GameConfig {
        waves: Vec::new(),
        ..GameConfig::default()
    };
    world_with(&config)
}

pub fn world_with(config: &GameConfig) -> World {
    let mut textures = placeholder_textures();
    World::new(config, &mut textures).unwrap()
}

pub fn player_position(world: &World) -> Vec2 {
    world.graph().transform(world.player()).unwrap().position
}

fn place(world: &mut World, node: NodeTree, position: Vec2) -> NodeId {
    let layer = world.air_layer();
    world.graph_mut().attach_child(layer, node.at(position)).unwrap()
}

pub fn place_enemy(world: &mut World, kind: AircraftType, position: Vec2) -> NodeId {
    let enemy = Aircraft::new(kind, Rc::clone(world.tables()));
    place(world, enemy.into_node(), position)
}

pub fn place_aircraft(world: &mut World, aircraft: Aircraft, position: Vec2) -> NodeId {
    place(world, aircraft.into_node(), position)
}

pub fn place_projectile(world: &mut World, kind: ProjectileType, position: Vec2) -> NodeId {
    let projectile = Projectile::new(kind, world.tables());
    place(world, projectile.into_node(), position)
}

pub fn place_pickup(world: &mut World, kind: PickupType, position: Vec2) -> NodeId {
    let pickup = Pickup::new(kind, world.tables());
    place(world, NodeTree::new(pickup), position)
}

/// Children of the air layer carrying behaviour `T`
pub fn air_nodes<T: NodeBehavior>(world: &World) -> Vec<NodeId> {
    let graph = world.graph();
    graph
        .children(world.air_layer())
        .iter()
        .copied()
        .filter(|&id| graph.behavior::<T>(id).is_some())
        .collect()
}
