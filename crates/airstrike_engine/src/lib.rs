//! # Airstrike Engine
//!
//! Scene graph, command bus and collision core for 2D scrolling shooters.
//!
//! ## Features
//!
//! - **Scene graph**: arena-backed transform hierarchy with per-node behaviours
//! - **Commands**: category-addressed deferred actions over the whole tree
//! - **Collision**: all-pairs bounding box detection with category matching
//! - **Assets**: identifier-keyed texture table
//! - **Rendering contract**: any [`render::RenderTarget`] can consume the scene
//!
//! ## Quick Start
//!
//! ```rust
//! use airstrike_engine::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! let layer = graph
//!     .attach_child(graph.root(), NodeTree::group(Category::AIR_SCENE_LAYER))
//!     .unwrap();
//!
//! let mut commands = CommandQueue::new();
//! commands.push(Command::new(Category::AIR_SCENE_LAYER, |graph, id, _dt| {
//!     if let Some(transform) = graph.transform_mut(id) {
//!         transform.move_by(Vec2::new(0.0, -10.0));
//!     }
//! }));
//!
//! while let Some(command) = commands.pop() {
//!     graph.on_command(graph.root(), &command, 1.0 / 60.0);
//! }
//! assert_eq!(graph.world_position(layer), Some(Vec2::new(0.0, -10.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod scene;
pub mod command;
pub mod physics;
pub mod assets;
pub mod render;
pub mod input;
pub mod config;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ResourceError, Texture, TextureId, TextureManager},
        command::{Command, CommandQueue},
        config::{Config, ConfigError},
        foundation::{
            math::{Rect, Transform2D, Transformable, Vec2},
            time::{FixedTimestep, FrameStatistics, Timer},
        },
        input::{InputEvent, InputState, KeyCode},
        physics::CollisionPair,
        render::{Color, DrawList, RenderStates, RenderTarget, Sprite},
        scene::{Category, Entity, NodeBehavior, NodeContext, NodeId, NodeTree, SceneError, SceneGraph},
    };
}
