//! Projectile node
//!
//! Bullets fly straight. Missiles are guided: every tick they turn toward the
//! last target direction they were given and face along their velocity.

use airstrike_engine::foundation::math::{utils, Rect, Transform2D, Vec2};
use airstrike_engine::render::{RenderStates, RenderTarget, Sprite};
use airstrike_engine::scene::{Category, Entity, NodeBehavior, NodeContext, NodeTree};

use super::emitter::EmitterNode;
use crate::data_tables::{DataTables, ParticleType, ProjectileType};

/// How quickly a missile turns toward its target, in units per second squared
const APPROACH_RATE: f32 = 200.0;

/// Projectile behaviour
#[derive(Debug, Clone)]
pub struct Projectile {
    kind: ProjectileType,
    entity: Entity,
    sprite: Sprite,
    damage: i32,
    max_speed: f32,
    target_direction: Vec2,
}

impl Projectile {
    /// Projectile of `kind`, at rest
    pub fn new(kind: ProjectileType, tables: &DataTables) -> Self {
        let data = &tables.projectiles[kind];
        let mut sprite = Sprite::new(data.texture, data.texture_rect);
        sprite.center_origin();

        Self {
            kind,
            entity: Entity::new(1),
            sprite,
            damage: data.damage,
            max_speed: data.speed,
            target_direction: Vec2::zeros(),
        }
    }

    /// Wrap into a node; missiles get smoke and exhaust emitters at their tail
    pub fn into_node(self) -> NodeTree {
        let guided = self.is_guided();
        let tail = Vec2::new(0.0, self.sprite.global_bounds().height / 2.0);
        let mut node = NodeTree::new(self);

        if guided {
            node.attach_child(NodeTree::new(EmitterNode::new(ParticleType::Smoke)).at(tail));
            node.attach_child(NodeTree::new(EmitterNode::new(ParticleType::Propellant)).at(tail));
        }
        node
    }

    /// Projectile type
    pub fn kind(&self) -> ProjectileType {
        self.kind
    }

    /// Whether the projectile steers toward targets
    pub fn is_guided(&self) -> bool {
        self.kind == ProjectileType::Missile
    }

    /// Hit points removed on impact
    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Cruise speed
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.entity.set_velocity(velocity);
    }

    /// Steer from `position` toward `target` (both in world space)
    pub fn guide_towards(&mut self, position: Vec2, target: Vec2) {
        debug_assert!(self.is_guided(), "only missiles can be guided");
        self.target_direction = utils::unit_vector(target - position);
    }

    /// Direction the missile currently steers toward
    pub fn target_direction(&self) -> Vec2 {
        self.target_direction
    }
}

impl NodeBehavior for Projectile {
    fn category(&self) -> Category {
        match self.kind {
            ProjectileType::EnemyBullet => Category::ENEMY_PROJECTILE,
            ProjectileType::AlliedBullet | ProjectileType::Missile => Category::ALLIED_PROJECTILE,
        }
    }

    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        if self.is_guided() {
            let steered = APPROACH_RATE * dt * self.target_direction + self.entity.velocity();
            let velocity = utils::unit_vector(steered) * self.max_speed;
            let angle = velocity.y.atan2(velocity.x);

            ctx.transform.set_rotation(utils::to_degree(angle) + 90.0);
            self.entity.set_velocity(velocity);
        }

        self.entity.integrate(ctx.transform, dt);
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
