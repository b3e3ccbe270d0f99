//! World
//!
//! Owns the scene graph, the command queue and the spawn table, and runs the
//! fixed per-tick pipeline: scroll, synthetic commands, command dispatch,
//! collisions, removal sweep, player velocity fix-up, update traversal,
//! player clamping and enemy spawning.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use airstrike_engine::assets::{TextureId, TextureManager};
use airstrike_engine::command::{Command, CommandQueue};
use airstrike_engine::foundation::math::{Rect, Vec2};
use airstrike_engine::physics::CollisionPair;
use airstrike_engine::render::{RenderTarget, Sprite};
use airstrike_engine::scene::{Category, NodeId, NodeTree, SceneGraph, SpriteNode};

use crate::config::{GameConfig, WorldConfig};
use crate::data_tables::{AircraftType, DataTables, ParticleType};
use crate::entities::{Aircraft, ParticleNode, Pickup, Projectile};
use crate::error::Result;
use crate::spawn::SpawnTable;

/// Scene layers, drawn back to front
#[derive(Debug, Clone, Copy)]
struct SceneLayers {
    background: NodeId,
    lower_air: NodeId,
    upper_air: NodeId,
}

/// The playing field
pub struct World {
    config: WorldConfig,
    tables: Rc<DataTables>,
    graph: SceneGraph,
    layers: SceneLayers,
    commands: CommandQueue,
    view_center: Vec2,
    world_bounds: Rect,
    spawn_position: Vec2,
    player: NodeId,
    spawn_table: SpawnTable,
    active_enemies: Rc<RefCell<Vec<NodeId>>>,
}

impl World {
    /// Build the scene for `config`.
    ///
    /// Every texture the scene refers to must already be registered in
    /// `textures`; the background texture is switched to repeating.
    pub fn new(config: &GameConfig, textures: &mut TextureManager) -> Result<Self> {
        config.validate()?;

        textures.require(config.tables.textures())?;
        textures.require([TextureId::Jungle, TextureId::Particle, TextureId::FinishLine])?;
        textures.get_mut(TextureId::Jungle)?.repeated = true;

        let view_size = config.world.view_size();
        let world_bounds = Rect::new(0.0, 0.0, view_size.x, config.world.world_height);
        let spawn_position = Vec2::new(view_size.x / 2.0, world_bounds.height - view_size.y / 2.0);

        let tables = Rc::new(config.tables.clone());
        let mut graph = SceneGraph::new();
        graph.set_show_bounding_boxes(config.world.show_bounding_boxes);

        let root = graph.root();
        let layers = SceneLayers {
            background: graph.attach_child(root, NodeTree::group(Category::NONE))?,
            lower_air: graph.attach_child(root, NodeTree::group(Category::NONE))?,
            upper_air: graph.attach_child(root, NodeTree::group(Category::AIR_SCENE_LAYER))?,
        };

        let particle_size = textures.get(TextureId::Particle)?.size();
        for kind in [ParticleType::Smoke, ParticleType::Propellant] {
            let container = ParticleNode::new(kind, tables.particles[kind].clone(), TextureId::Particle, particle_size);
            graph.attach_child(layers.lower_air, NodeTree::new(container))?;
        }

        let background = Sprite::new(TextureId::Jungle, world_bounds);
        graph.attach_child(
            layers.background,
            NodeTree::new(SpriteNode::new(background)).at(Vec2::new(world_bounds.left, world_bounds.top)),
        )?;

        let finish_size = textures.get(TextureId::FinishLine)?.size();
        let finish = Sprite::new(TextureId::FinishLine, Rect::new(0.0, 0.0, finish_size.x, finish_size.y));
        graph.attach_child(
            layers.background,
            NodeTree::new(SpriteNode::new(finish)).at(Vec2::new(world_bounds.left, world_bounds.top - finish_size.y)),
        )?;

        let mut leader = Aircraft::new(AircraftType::Eagle, Rc::clone(&tables));
        leader.accelerate(Vec2::new(50.0, config.world.scroll_speed));
        let player = graph.attach_child(layers.upper_air, leader.into_node().at(spawn_position))?;

        let spawn_table = SpawnTable::from_waves(spawn_position, &config.waves);
        log::info!(
            "World built: {}x{} world, {} enemies queued",
            world_bounds.width,
            world_bounds.height,
            spawn_table.len()
        );

        Ok(Self {
            config: config.world.clone(),
            tables,
            graph,
            layers,
            commands: CommandQueue::new(),
            view_center: spawn_position,
            world_bounds,
            spawn_position,
            player,
            spawn_table,
            active_enemies: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Advance the simulation by one fixed step
    pub fn update(&mut self, dt: f32) {
        self.view_center.y += self.config.scroll_speed * dt;
        if let Some(player) = self.graph.entity_mut(self.player) {
            player.set_velocity(Vec2::zeros());
        }

        self.destroy_entities_outside_view();
        self.guide_missiles();

        let root = self.graph.root();
        while let Some(command) = self.commands.pop() {
            self.graph.on_command(root, &command, dt);
        }
        self.active_enemies.borrow_mut().clear();

        self.handle_collisions();
        self.graph.remove_wrecks(root);

        self.adapt_player_velocity();
        self.graph.update(root, dt, &mut self.commands);
        self.adapt_player_position();

        self.spawn_enemies();
    }

    /// Draw the scene as seen through the current view
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.set_view(self.view_bounds());
        self.graph.draw_all(target);
    }

    /// Queue for commands issued by the player's input
    pub fn command_queue(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    /// Whether the player's aircraft is still flying
    pub fn has_alive_player(&self) -> bool {
        self.graph.entity(self.player).is_some_and(|player| !player.is_destroyed())
    }

    /// Whether the player has flown off the end of the world
    pub fn has_player_reached_end(&self) -> bool {
        self.graph
            .transform(self.player)
            .is_some_and(|transform| !self.world_bounds.contains(transform.position))
    }

    /// Scene graph
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable scene graph
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Player's aircraft node (gone from the graph once its wreck is swept)
    pub fn player(&self) -> NodeId {
        self.player
    }

    /// Player's aircraft, while it is in the graph
    pub fn player_aircraft(&self) -> Option<&Aircraft> {
        self.graph.behavior::<Aircraft>(self.player)
    }

    /// Layer holding aircraft, projectiles and pickups
    pub fn air_layer(&self) -> NodeId {
        self.layers.upper_air
    }

    /// Where the player starts
    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    /// Enemies still waiting to spawn
    pub fn pending_spawns(&self) -> usize {
        self.spawn_table.len()
    }

    /// Tables shared with every node the world builds
    pub fn tables(&self) -> &Rc<DataTables> {
        &self.tables
    }

    /// Whole world area
    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    /// Visible area
    pub fn view_bounds(&self) -> Rect {
        let size = self.config.view_size();
        Rect::from_position_size(self.view_center - size / 2.0, size)
    }

    /// Visible area extended upward by the battlefield margin
    pub fn battlefield_bounds(&self) -> Rect {
        let mut bounds = self.view_bounds();
        bounds.top -= self.config.battlefield_margin;
        bounds.height += self.config.battlefield_margin;
        bounds
    }

    fn destroy_entities_outside_view(&mut self) {
        let battlefield = self.battlefield_bounds();
        self.commands.push(Command::new(
            Category::PROJECTILE | Category::ENEMY_AIRCRAFT,
            move |graph: &mut SceneGraph, node: NodeId, _dt: f32| {
                if graph.entity(node).is_some() && !battlefield.intersects(&graph.bounding_box(node)) {
                    graph.remove(node);
                }
            },
        ));
    }

    fn guide_missiles(&mut self) {
        self.active_enemies.borrow_mut().clear();

        let enemies = Rc::clone(&self.active_enemies);
        let collector = Command::new(
            Category::ENEMY_AIRCRAFT,
            move |graph: &mut SceneGraph, node: NodeId, _dt: f32| {
                if graph.behavior::<Aircraft>(node).is_some() && !graph.is_destroyed(node) {
                    enemies.borrow_mut().push(node);
                }
            },
        );

        let enemies = Rc::clone(&self.active_enemies);
        let guider = Command::new(
            Category::ALLIED_PROJECTILE,
            move |graph: &mut SceneGraph, node: NodeId, _dt: f32| {
                if !graph.behavior::<Projectile>(node).is_some_and(Projectile::is_guided) {
                    return;
                }
                let Some(position) = graph.world_position(node) else {
                    return;
                };

                let mut closest: Option<(f32, Vec2)> = None;
                for &enemy in enemies.borrow().iter() {
                    let Some(target) = graph.world_position(enemy) else {
                        continue;
                    };
                    let distance = (target - position).norm();
                    if closest.map_or(true, |(best, _)| distance < best) {
                        closest = Some((distance, target));
                    }
                }

                if let (Some((_, target)), Some(missile)) = (closest, graph.behavior_mut::<Projectile>(node)) {
                    missile.guide_towards(position, target);
                }
            },
        );

        self.commands.push(collector);
        self.commands.push(guider);
    }

    fn handle_collisions(&mut self) {
        let mut pairs = BTreeSet::new();
        self.graph.check_scene_collision(self.graph.root(), &mut pairs);

        for mut pair in pairs {
            if pair.matches_categories(&self.graph, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT) {
                self.resolve_ramming(pair);
            } else if pair.matches_categories(&self.graph, Category::PLAYER_AIRCRAFT, Category::PICKUP) {
                self.resolve_pickup(pair);
            } else if pair.matches_categories(&self.graph, Category::PLAYER_AIRCRAFT, Category::ENEMY_PROJECTILE)
                || pair.matches_categories(&self.graph, Category::ENEMY_AIRCRAFT, Category::ALLIED_PROJECTILE)
            {
                self.resolve_hit(pair);
            }
        }
    }

    fn resolve_ramming(&mut self, pair: CollisionPair) {
        let enemy_hit_points = self.graph.entity(pair.second).map_or(0, |enemy| enemy.hit_points().max(0));

        if let Some(player) = self.graph.entity_mut(pair.first) {
            player.damage(enemy_hit_points);
        }
        if let Some(enemy) = self.graph.entity_mut(pair.second) {
            enemy.destroy();
        }
    }

    fn resolve_pickup(&mut self, pair: CollisionPair) {
        let Some(effect) = self.graph.behavior::<Pickup>(pair.second).map(Pickup::effect) else {
            return;
        };

        if let Some(player) = self.graph.behavior_mut::<Aircraft>(pair.first) {
            effect.apply(player);
            log::debug!("Player collected {effect:?}");
        }
        if let Some(pickup) = self.graph.entity_mut(pair.second) {
            pickup.destroy();
        }
    }

    fn resolve_hit(&mut self, pair: CollisionPair) {
        let damage = self.graph.behavior::<Projectile>(pair.second).map_or(0, Projectile::damage);

        if let Some(aircraft) = self.graph.entity_mut(pair.first) {
            aircraft.damage(damage);
        }
        if let Some(projectile) = self.graph.entity_mut(pair.second) {
            projectile.destroy();
        }
    }

    fn adapt_player_velocity(&mut self) {
        if let Some(player) = self.graph.entity_mut(self.player) {
            let velocity = player.velocity();
            if velocity.x != 0.0 && velocity.y != 0.0 {
                player.set_velocity(velocity / std::f32::consts::SQRT_2);
            }
        }
    }

    fn adapt_player_position(&mut self) {
        let view = self.view_bounds();
        let border = self.config.border_distance;

        if let Some(transform) = self.graph.transform_mut(self.player) {
            let position = &mut transform.position;
            position.x = position.x.max(view.left + border).min(view.right() - border);
            position.y = position.y.max(view.top + border).min(view.bottom() - border);
        }
    }

    fn spawn_enemies(&mut self) {
        let battlefield_top = self.battlefield_bounds().top;

        while let Some(point) = self.spawn_table.pop_due(battlefield_top) {
            let enemy = Aircraft::new(point.kind, Rc::clone(&self.tables))
                .with_pickup_drop_chance(self.config.pickup_drop_chance);
            let mut node = enemy.into_node().at(Vec2::new(point.x, point.y));
            node.transform_mut().set_rotation(180.0);

            match self.graph.attach_child(self.layers.upper_air, node) {
                Ok(_) => log::debug!("Spawned {:?} at ({:.0}, {:.0})", point.kind, point.x, point.y),
                Err(err) => log::warn!("Failed to spawn {:?}: {err}", point.kind),
            }
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("view_center", &self.view_center)
            .field("player", &self.player)
            .field("pending_spawns", &self.spawn_table.len())
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}
