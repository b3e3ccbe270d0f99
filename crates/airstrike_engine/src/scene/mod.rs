//! Scene module
//!
//! Hierarchical scene graph with per-node behaviours, categories for command
//! and collision filtering, and the gameplay entity state nodes embed.

pub mod category;
pub mod entity;
pub mod graph;
pub mod leaf;
pub mod node;

pub use category::Category;
pub use entity::Entity;
pub use graph::{NodeId, SceneError, SceneGraph};
pub use leaf::{SpriteNode, TextNode};
pub use node::{AsAny, Group, NodeBehavior, NodeContext, NodeTree};
