//! Aircraft node
//!
//! Player and enemy aircraft share one behaviour: movement patterns, the gun
//! and missile launcher, pickup upgrades, the roll animation, the hit point
//! label and the explosion that plays before the wreck is swept away.

use std::rc::Rc;

use airstrike_engine::command::Command;
use airstrike_engine::foundation::math::{utils, Rect, Transform2D, Vec2};
use airstrike_engine::render::{RenderStates, RenderTarget, Sprite};
use airstrike_engine::scene::{Category, Entity, NodeBehavior, NodeContext, NodeId, NodeTree, SceneGraph, TextNode};
use rand::Rng;

use super::animation::Animation;
use super::pickup::Pickup;
use super::projectile::Projectile;
use crate::data_tables::{AircraftData, AircraftType, DataTables, PickupType, ProjectileType};

/// Highest fire rate level
pub const MAX_FIRE_RATE_LEVEL: u32 = 10;

/// Highest spread level
pub const MAX_FIRE_SPREAD_LEVEL: u32 = 3;

/// Offset of the hit point label below the aircraft
const HEALTH_DISPLAY_OFFSET: f32 = 50.0;

/// Aircraft behaviour
pub struct Aircraft {
    kind: AircraftType,
    entity: Entity,
    tables: Rc<DataTables>,
    sprite: Sprite,
    explosion: Animation,
    show_explosion: bool,
    travelled_distance: f32,
    direction_index: usize,
    is_firing: bool,
    is_launching_missile: bool,
    fire_rate_level: u32,
    fire_spread_level: u32,
    fire_countdown: f32,
    missile_ammo: u32,
    pickup_drop_chance: f64,
    pickup_checked: bool,
}

impl Aircraft {
    /// Aircraft of `kind` with full hit points
    pub fn new(kind: AircraftType, tables: Rc<DataTables>) -> Self {
        let data = &tables.aircraft[kind];
        let mut sprite = Sprite::new(data.texture, data.texture_rect);
        sprite.center_origin();

        Self {
            kind,
            entity: Entity::new(data.hit_points),
            sprite,
            explosion: Animation::from_explosion(&tables.explosion),
            show_explosion: true,
            travelled_distance: 0.0,
            direction_index: 0,
            is_firing: false,
            is_launching_missile: false,
            fire_rate_level: 1,
            fire_spread_level: 1,
            fire_countdown: 0.0,
            missile_ammo: data.missile_ammo,
            pickup_drop_chance: 0.0,
            pickup_checked: false,
            tables,
        }
    }

    /// Builder: chance in `[0, 1]` that the wreck drops a pickup.
    ///
    /// Out-of-range values are clamped; non-finite values disable drops.
    #[must_use]
    pub fn with_pickup_drop_chance(mut self, chance: f64) -> Self {
        self.pickup_drop_chance = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    /// Chance that the wreck drops a pickup
    pub fn pickup_drop_chance(&self) -> f64 {
        self.pickup_drop_chance
    }

    /// Wrap into a node carrying the hit point label as its child
    pub fn into_node(self) -> NodeTree {
        let label = NodeTree::new(TextNode::new("")).at(Vec2::new(0.0, HEALTH_DISPLAY_OFFSET));
        NodeTree::new(self).with_child(label)
    }

    fn data(&self) -> &AircraftData {
        &self.tables.aircraft[self.kind]
    }

    /// Aircraft type
    pub fn kind(&self) -> AircraftType {
        self.kind
    }

    /// Whether the aircraft flies on the player's side
    pub fn is_allied(&self) -> bool {
        self.kind == AircraftType::Eagle
    }

    /// Remaining hit points
    pub fn hit_points(&self) -> i32 {
        self.entity.hit_points()
    }

    /// Maximum speed
    pub fn max_speed(&self) -> f32 {
        self.data().speed
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.entity.velocity()
    }

    /// Add to the velocity
    pub fn accelerate(&mut self, velocity: Vec2) {
        self.entity.accelerate(velocity);
    }

    /// Request a volley; aircraft without a gun ignore it
    pub fn fire(&mut self) {
        if self.data().fire_interval > 0.0 {
            self.is_firing = true;
        }
    }

    /// Request a missile launch; ignored without ammunition
    pub fn launch_missile(&mut self) {
        if self.missile_ammo > 0 {
            self.is_launching_missile = true;
        }
    }

    /// Add hit points
    pub fn repair(&mut self, points: i32) {
        self.entity.repair(points);
    }

    /// Add missiles
    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo += count;
    }

    /// Missiles left
    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    /// Raise the fire rate level, up to [`MAX_FIRE_RATE_LEVEL`]
    pub fn increase_fire_rate(&mut self) {
        if self.fire_rate_level < MAX_FIRE_RATE_LEVEL {
            self.fire_rate_level += 1;
        }
    }

    /// Current fire rate level
    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    /// Raise the spread level, up to [`MAX_FIRE_SPREAD_LEVEL`]
    pub fn increase_fire_spread(&mut self) {
        if self.fire_spread_level < MAX_FIRE_SPREAD_LEVEL {
            self.fire_spread_level += 1;
        }
    }

    /// Current spread level
    pub fn fire_spread_level(&self) -> u32 {
        self.fire_spread_level
    }

    /// Whether the explosion animation has played to the end
    pub fn is_explosion_finished(&self) -> bool {
        self.explosion.is_finished()
    }

    fn update_movement_pattern(&mut self, dt: f32) {
        let speed = self.max_speed();
        let directions = &self.tables.aircraft[self.kind].directions;
        if directions.is_empty() {
            return;
        }

        if self.travelled_distance > directions[self.direction_index].distance {
            self.direction_index = (self.direction_index + 1) % directions.len();
            self.travelled_distance = 0.0;
        }

        let radians = utils::to_radian(directions[self.direction_index].angle + 90.0);
        self.entity
            .set_velocity(Vec2::new(speed * radians.cos(), speed * radians.sin()));
        self.travelled_distance += speed * dt;
    }

    fn update_roll_animation(&mut self) {
        let data = self.data();
        if !data.has_roll_animation {
            return;
        }

        let mut rect = data.texture_rect;
        let vx = self.entity.velocity().x;
        if vx < 0.0 {
            rect.left += rect.width;
        } else if vx > 0.0 {
            rect.left += 2.0 * rect.width;
        }
        self.sprite.set_texture_rect(rect);
    }

    fn update_health_display(&self, ctx: &mut NodeContext<'_>) {
        let label = format!("{} HP", self.entity.hit_points());
        let rotation = ctx.transform.rotation;

        for child in ctx.graph.children(ctx.id).to_vec() {
            if let Some(text) = ctx.graph.behavior_mut::<TextNode>(child) {
                text.set_string(label.clone());
                if let Some(transform) = ctx.graph.transform_mut(child) {
                    transform.position = Vec2::new(0.0, HEALTH_DISPLAY_OFFSET);
                    transform.set_rotation(-rotation);
                }
            }
        }
    }

    fn check_projectile_launch(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        if !self.is_allied() {
            self.fire();
        }

        let origin = ctx.world_position();

        if self.is_firing && self.fire_countdown <= 0.0 {
            ctx.push(self.fire_command(origin));
            self.fire_countdown += self.data().fire_interval / (self.fire_rate_level as f32 + 1.0);
            self.is_firing = false;
        } else if self.fire_countdown > 0.0 {
            self.fire_countdown -= dt;
        }

        if self.is_launching_missile {
            ctx.push(self.missile_command(origin));
            self.missile_ammo -= 1;
            self.is_launching_missile = false;
        }
    }

    fn check_pickup_drop(&mut self, ctx: &mut NodeContext<'_>) {
        if !self.pickup_checked && !self.is_allied() && rand::thread_rng().gen_bool(self.pickup_drop_chance) {
            let kind = PickupType::ALL[rand::thread_rng().gen_range(0..PickupType::ALL.len())];
            let position = ctx.world_position();
            ctx.push(pickup_command(Rc::clone(&self.tables), kind, position));
        }
        self.pickup_checked = true;
    }

    fn projectile_side(&self) -> (ProjectileType, f32) {
        if self.is_allied() {
            (ProjectileType::AlliedBullet, -1.0)
        } else {
            (ProjectileType::EnemyBullet, 1.0)
        }
    }

    fn fire_command(&self, origin: Vec2) -> Command {
        let (kind, sign) = self.projectile_side();
        let size = self.sprite.global_bounds().size();
        let tables = Rc::clone(&self.tables);
        let offsets = spread_offsets(self.fire_spread_level);

        Command::new(Category::AIR_SCENE_LAYER, move |graph: &mut SceneGraph, layer: NodeId, _dt: f32| {
            for &x_offset in offsets {
                let offset = Vec2::new(x_offset * size.x, 0.5 * size.y);
                spawn_projectile(graph, layer, &tables, kind, origin + offset * sign, sign);
            }
        })
    }

    fn missile_command(&self, origin: Vec2) -> Command {
        let (_, sign) = self.projectile_side();
        let size = self.sprite.global_bounds().size();
        let tables = Rc::clone(&self.tables);

        Command::new(Category::AIR_SCENE_LAYER, move |graph: &mut SceneGraph, layer: NodeId, _dt: f32| {
            let offset = Vec2::new(0.0, 0.5 * size.y);
            spawn_projectile(graph, layer, &tables, ProjectileType::Missile, origin + offset * sign, sign);
        })
    }
}

/// Horizontal bullet offsets, in sprite widths, for a spread level
fn spread_offsets(level: u32) -> &'static [f32] {
    match level {
        0 | 1 => &[0.0],
        2 => &[-0.33, 0.33],
        _ => &[-0.5, 0.0, 0.5],
    }
}

fn spawn_projectile(
    graph: &mut SceneGraph,
    layer: NodeId,
    tables: &DataTables,
    kind: ProjectileType,
    position: Vec2,
    sign: f32,
) {
    let mut projectile = Projectile::new(kind, tables);
    projectile.set_velocity(Vec2::new(0.0, projectile.max_speed() * sign));

    if let Err(err) = graph.attach_child(layer, projectile.into_node().at(position)) {
        log::warn!("Failed to spawn {kind:?}: {err}");
    }
}

fn pickup_command(tables: Rc<DataTables>, kind: PickupType, position: Vec2) -> Command {
    Command::new(Category::AIR_SCENE_LAYER, move |graph: &mut SceneGraph, layer: NodeId, _dt: f32| {
        let pickup = Pickup::new(kind, &tables);
        match graph.attach_child(layer, NodeTree::new(pickup).at(position)) {
            Ok(_) => log::debug!("Dropped {kind:?} at ({:.0}, {:.0})", position.x, position.y),
            Err(err) => log::warn!("Failed to drop {kind:?}: {err}"),
        }
    })
}

impl NodeBehavior for Aircraft {
    fn category(&self) -> Category {
        if self.is_allied() {
            Category::PLAYER_AIRCRAFT
        } else {
            Category::ENEMY_AIRCRAFT
        }
    }

    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        if self.entity.is_destroyed() {
            self.check_pickup_drop(ctx);
            self.explosion.update(dt);
            return;
        }

        self.check_projectile_launch(ctx, dt);
        self.update_movement_pattern(dt);
        self.entity.integrate(ctx.transform, dt);
        self.update_roll_animation();
        self.update_health_display(ctx);
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        if self.entity.is_destroyed() && self.show_explosion {
            target.draw_sprite(self.explosion.sprite(), states);
        } else {
            target.draw_sprite(&self.sprite, states);
        }
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

    fn is_marked_for_removal(&self) -> bool {
        self.entity.is_destroyed() && (self.explosion.is_finished() || !self.show_explosion)
    }

    fn remove(&mut self) {
        self.entity.destroy();
        self.show_explosion = false;
    }
}
