//! Scene node behaviour and detached subtrees
//!
//! A node in the graph is a slot holding its local transform, links to its
//! parent and children, its category and an optional [`NodeBehavior`]. The
//! behaviour is the per-variant part: aircraft, projectiles, particle
//! containers and so on each implement the hooks they need.

use std::any::Any;

use super::category::Category;
use super::entity::Entity;
use super::graph::{NodeId, SceneGraph};
use crate::command::{Command, CommandQueue};
use crate::foundation::math::{Rect, Transform2D, Transformable, Vec2};
use crate::render::{RenderStates, RenderTarget};

/// Upcast helper so behaviours can be downcast to their concrete type
pub trait AsAny: Any {
    /// Borrow as [`Any`]
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as [`Any`]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-variant hooks of a scene node.
///
/// Every hook has a default so plain grouping nodes implement nothing.
pub trait NodeBehavior: AsAny {
    /// Category reported to commands and collision resolution.
    ///
    /// Read once when the node is attached to a graph.
    fn category(&self) -> Category {
        Category::NONE
    }

    /// Per-tick update of this node only (children are updated by the graph)
    fn update_current(&mut self, _ctx: &mut NodeContext<'_>, _dt: f32) {}

    /// Draw this node only, with `states` already carrying its world transform
    fn draw_current(&self, _target: &mut dyn RenderTarget, _states: &RenderStates) {}

    /// World-space bounding box given the node's world transform.
    ///
    /// Nodes without a box return an empty rectangle and never collide.
    fn bounding_box(&self, _world: &Transform2D) -> Rect {
        Rect::default()
    }

    /// Embedded gameplay state, if any
    fn entity(&self) -> Option<&Entity> {
        None
    }

    /// Mutable embedded gameplay state, if any
    fn entity_mut(&mut self) -> Option<&mut Entity> {
        None
    }

    /// Destroyed nodes are excluded from collision
    fn is_destroyed(&self) -> bool {
        self.entity().is_some_and(Entity::is_destroyed)
    }

    /// Whether the removal sweep should drop this node and its subtree
    fn is_marked_for_removal(&self) -> bool {
        self.is_destroyed()
    }

    /// Remove without any death effect
    fn remove(&mut self) {
        if let Some(entity) = self.entity_mut() {
            entity.destroy();
        }
    }
}

/// Behaviour of plain grouping nodes such as the root and scene layers
#[derive(Debug, Clone, Copy, Default)]
pub struct Group {
    category: Category,
}

impl Group {
    /// Group reporting `category`
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl NodeBehavior for Group {
    fn category(&self) -> Category {
        self.category
    }
}

/// Access given to a behaviour while it updates.
///
/// The node's transform is lent out separately from the graph; read it
/// through the context rather than through `graph`, which still holds the
/// value from before the update.
pub struct NodeContext<'a> {
    /// The graph the node lives in
    pub graph: &'a mut SceneGraph,
    /// Node being updated
    pub id: NodeId,
    /// Local transform of the node being updated
    pub transform: &'a mut Transformable,
    /// World transform of the node's parent
    pub parent_world: Transform2D,
    /// Queue for commands issued during the update
    pub commands: &'a mut CommandQueue,
}

impl NodeContext<'_> {
    /// Current world transform of the node
    pub fn world_transform(&self) -> Transform2D {
        self.parent_world * self.transform.transform()
    }

    /// Current world position of the node
    pub fn world_position(&self) -> Vec2 {
        self.world_transform().transform_point(Vec2::zeros())
    }

    /// Queue a command for the next tick
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Subtree that is not part of any graph.
///
/// Built before attachment and returned by detachment; the graph owns nodes
/// only while they are attached.
pub struct NodeTree {
    pub(crate) transform: Transformable,
    pub(crate) behavior: Box<dyn NodeBehavior>,
    pub(crate) children: Vec<NodeTree>,
}

impl NodeTree {
    /// Single node with the given behaviour
    pub fn new(behavior: impl NodeBehavior) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    /// Single node with an already boxed behaviour
    pub fn from_boxed(behavior: Box<dyn NodeBehavior>) -> Self {
        Self {
            transform: Transformable::default(),
            behavior,
            children: Vec::new(),
        }
    }

    /// Grouping node reporting `category`
    pub fn group(category: Category) -> Self {
        Self::new(Group::new(category))
    }

    /// Builder: place the node at `position`
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder: add a child
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child
    pub fn attach_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Local transform of the subtree's root
    pub fn transform(&self) -> &Transformable {
        &self.transform
    }

    /// Mutable local transform of the subtree's root
    pub fn transform_mut(&mut self) -> &mut Transformable {
        &mut self.transform
    }

    /// Category of the subtree's root
    pub fn category(&self) -> Category {
        self.behavior.category()
    }

    /// Direct children
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Number of nodes in the subtree, including its root
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Downcast the root's behaviour
    pub fn behavior<T: NodeBehavior>(&self) -> Option<&T> {
        let behavior: &dyn NodeBehavior = self.behavior.as_ref();
        behavior.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast the root's behaviour
    pub fn behavior_mut<T: NodeBehavior>(&mut self) -> Option<&mut T> {
        let behavior: &mut dyn NodeBehavior = self.behavior.as_mut();
        behavior.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTree")
            .field("category", &self.category())
            .field("transform", &self.transform)
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker(u32);

    impl NodeBehavior for Marker {}

    #[test]
    fn test_downcast_through_tree() {
        let mut tree = NodeTree::new(Marker(7)).with_child(NodeTree::group(Category::PICKUP));

        assert_eq!(tree.behavior::<Marker>().map(|m| m.0), Some(7));
        assert!(tree.behavior::<Group>().is_none());

        if let Some(marker) = tree.behavior_mut::<Marker>() {
            marker.0 = 9;
        }
        assert_eq!(tree.behavior::<Marker>().map(|m| m.0), Some(9));
        assert_eq!(tree.children()[0].category(), Category::PICKUP);
    }

    #[test]
    fn test_node_count() {
        let tree = NodeTree::group(Category::NONE)
            .with_child(NodeTree::group(Category::NONE).with_child(NodeTree::group(Category::NONE)))
            .with_child(NodeTree::group(Category::NONE));

        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_default_hooks() {
        let group = Group::new(Category::AIR_SCENE_LAYER);
        assert_eq!(group.category(), Category::AIR_SCENE_LAYER);
        assert!(!group.is_destroyed());
        assert!(!group.is_marked_for_removal());
        assert_eq!(group.bounding_box(&Transform2D::identity()), Rect::default());
    }
}
