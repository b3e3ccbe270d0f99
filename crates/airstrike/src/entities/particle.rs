//! Particle container node
//!
//! Holds every live particle of one type in world coordinates and draws them
//! as one batch of textured quads that fade out over their lifetime.

use std::collections::VecDeque;

use airstrike_engine::assets::TextureId;
use airstrike_engine::foundation::math::Vec2;
use airstrike_engine::render::{Color, RenderStates, RenderTarget, Vertex};
use airstrike_engine::scene::{Category, NodeBehavior, NodeContext};

use crate::data_tables::{ParticleData, ParticleType};

/// Single particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World position
    pub position: Vec2,
    /// Tint
    pub color: Color,
    /// Seconds left to live
    pub lifetime: f32,
}

/// Container for all particles of one type
#[derive(Debug, Clone)]
pub struct ParticleNode {
    kind: ParticleType,
    data: ParticleData,
    texture: TextureId,
    texture_size: Vec2,
    particles: VecDeque<Particle>,
}

impl ParticleNode {
    /// Empty container drawing particles with `texture` of `texture_size`
    pub fn new(kind: ParticleType, data: ParticleData, texture: TextureId, texture_size: Vec2) -> Self {
        Self {
            kind,
            data,
            texture,
            texture_size,
            particles: VecDeque::new(),
        }
    }

    /// Particle type held
    pub fn kind(&self) -> ParticleType {
        self.kind
    }

    /// Spawn a particle at a world position
    pub fn add_particle(&mut self, position: Vec2) {
        self.particles.push_back(Particle {
            position,
            color: self.data.color,
            lifetime: self.data.lifetime,
        });
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particle is alive
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn vertices(&self, states: &RenderStates) -> Vec<Vertex> {
        let size = self.texture_size;
        let half = size / 2.0;
        let mut vertices = Vec::with_capacity(self.particles.len() * 4);

        for particle in &self.particles {
            let ratio = (particle.lifetime / self.data.lifetime).max(0.0);
            let color = particle.color.with_alpha((255.0 * ratio) as u8);
            let center = states.transform.transform_point(particle.position);

            let corners = [
                (Vec2::new(-half.x, -half.y), [0.0, 0.0]),
                (Vec2::new(half.x, -half.y), [size.x, 0.0]),
                (Vec2::new(half.x, half.y), [size.x, size.y]),
                (Vec2::new(-half.x, half.y), [0.0, size.y]),
            ];
            for (offset, tex_coords) in corners {
                let position = center + offset;
                vertices.push(Vertex::new([position.x, position.y], tex_coords, color));
            }
        }

        vertices
    }
}

impl NodeBehavior for ParticleNode {
    fn category(&self) -> Category {
        Category::PARTICLE_SYSTEM
    }

    fn update_current(&mut self, _ctx: &mut NodeContext<'_>, dt: f32) {
        // Particles expire in spawn order, so the dead ones are at the front
        while self.particles.front().is_some_and(|particle| particle.lifetime <= 0.0) {
            self.particles.pop_front();
        }

        for particle in &mut self.particles {
            particle.lifetime -= dt;
        }
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        target.draw_quads(self.texture, &self.vertices(states));
    }
}
