//! Asset management
//!
//! Identifier-keyed resource tables. Resources are loaded before the scene is
//! built; lookups afterwards are synchronous and a missing identifier is an
//! error.

pub mod resource_holder;
pub mod texture;

pub use resource_holder::{ResourceError, ResourceHolder, ResourceLoader};
pub use texture::{ImageTextureLoader, Texture, TextureId, TextureManager};
