//! Gameplay nodes

pub mod aircraft;
pub mod animation;
pub mod emitter;
pub mod particle;
pub mod pickup;
pub mod projectile;

pub use aircraft::Aircraft;
pub use animation::Animation;
pub use emitter::EmitterNode;
pub use particle::{Particle, ParticleNode};
pub use pickup::Pickup;
pub use projectile::Projectile;
