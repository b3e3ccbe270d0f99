//! Entity state shared by every gameplay node
//!
//! Hit points, velocity and the one-way alive → destroyed transition.

use crate::foundation::math::{Transformable, Vec2};

/// Gameplay state embedded in aircraft, projectiles and pickups
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    hit_points: i32,
    velocity: Vec2,
}

impl Entity {
    /// Create an entity with the given hit points and no velocity
    pub fn new(hit_points: i32) -> Self {
        Self {
            hit_points,
            velocity: Vec2::zeros(),
        }
    }

    /// Remaining hit points (zero or negative once destroyed)
    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    /// Whether the entity has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.hit_points <= 0
    }

    /// Subtract hit points
    pub fn damage(&mut self, points: i32) {
        debug_assert!(points >= 0, "negative damage");
        self.hit_points -= points;
    }

    /// Add hit points; destroyed entities stay destroyed
    pub fn repair(&mut self, points: i32) {
        debug_assert!(points >= 0, "negative repair");
        if !self.is_destroyed() {
            self.hit_points += points;
        }
    }

    /// Destroy the entity immediately
    pub fn destroy(&mut self) {
        self.hit_points = 0;
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add to the velocity
    pub fn accelerate(&mut self, velocity: Vec2) {
        self.velocity += velocity;
    }

    /// Integrate position: `position += velocity * dt`
    pub fn integrate(&self, transform: &mut Transformable, dt: f32) {
        transform.move_by(self.velocity * dt);
    }
}
