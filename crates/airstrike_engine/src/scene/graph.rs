//! Scene graph
//!
//! Nodes live in a slot arena and refer to each other by [`NodeId`]. The
//! graph owns every attached node; subtrees move in and out of it as
//! [`NodeTree`] values.
//!
//! All traversals are pre-order, children in insertion order. Traversals that
//! may run behaviour code (update, command dispatch) walk a snapshot of each
//! child list, so children attached mid-pass are first visited by the next
//! pass.

use std::collections::BTreeSet;

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use thiserror::Error;

use super::category::Category;
use super::entity::Entity;
use super::node::{NodeBehavior, NodeContext, NodeTree};
use crate::command::{Command, CommandQueue};
use crate::foundation::math::{Rect, Transform2D, Transformable, Vec2};
use crate::physics::{collision, CollisionPair};
use crate::render::{Color, RenderStates, RenderTarget};

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

/// Scene graph errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The node is not part of this graph
    #[error("Unknown scene node {0:?}")]
    UnknownNode(NodeId),

    /// Detach was asked for a node that is not a direct child
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Node the child was expected under
        parent: NodeId,
        /// Node that was asked for
        child: NodeId,
    },

    /// The root cannot be detached
    #[error("The root node cannot be detached")]
    DetachRoot,

    /// The node is running its own update hook and cannot leave the graph
    #[error("Node {0:?} is being updated and cannot be detached")]
    NodeInUse(NodeId),
}

struct SceneNode {
    transform: Transformable,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    category: Category,
    // Empty only while the behaviour is lent out to its own update hook
    behavior: Option<Box<dyn NodeBehavior>>,
}

/// Tree of scene nodes with a single root
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
    show_bounding_boxes: bool,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Graph holding a single grouping root
    pub fn new() -> Self {
        Self::with_root(NodeTree::group(Category::NONE))
    }

    /// Graph whose root is `tree`
    pub fn with_root(tree: NodeTree) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = Self::insert_tree(&mut nodes, tree, None);
        Self {
            nodes,
            root,
            show_bounding_boxes: false,
        }
    }

    fn insert_tree(nodes: &mut SlotMap<NodeId, SceneNode>, tree: NodeTree, parent: Option<NodeId>) -> NodeId {
        let NodeTree {
            transform,
            behavior,
            children,
        } = tree;

        let id = nodes.insert(SceneNode {
            transform,
            parent,
            children: Vec::with_capacity(children.len()),
            category: behavior.category(),
            behavior: Some(behavior),
        });

        for child in children {
            let child_id = Self::insert_tree(nodes, child, Some(id));
            nodes[id].children.push(child_id);
        }

        id
    }

    fn extract_tree(&mut self, id: NodeId) -> Option<NodeTree> {
        let node = self.nodes.remove(id)?;
        let children = node
            .children
            .into_iter()
            .filter_map(|child| self.extract_tree(child))
            .collect();
        let behavior = node.behavior?;

        Some(NodeTree {
            transform: node.transform,
            behavior,
            children,
        })
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of attached nodes, root included
    // Never zero, so there is no `is_empty`; see `has_only_root`
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing but the root is attached
    pub fn has_only_root(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether `id` is attached to this graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Draw every node's bounding box outline after the node itself
    pub fn set_show_bounding_boxes(&mut self, show: bool) {
        self.show_bounding_boxes = show;
    }

    /// Attach `child` (and its subtree) under `parent`, returning the new id
    pub fn attach_child(&mut self, parent: NodeId, child: NodeTree) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }

        let id = Self::insert_tree(&mut self.nodes, child, Some(parent));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Detach `child` from `parent`, handing ownership of its subtree back.
    ///
    /// The graph is left untouched when `child` is not a direct child, or when
    /// a node of the subtree is in the middle of its own update hook.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeTree, SceneError> {
        if child == self.root {
            return Err(SceneError::DetachRoot);
        }

        let index = self
            .nodes
            .get(parent)
            .ok_or(SceneError::UnknownNode(parent))?
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(SceneError::NotAChild { parent, child })?;
        if let Some(busy) = self.node_in_update(child) {
            return Err(SceneError::NodeInUse(busy));
        }

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.remove(index);
        }

        self.extract_tree(child).ok_or(SceneError::UnknownNode(child))
    }

    // First node of the subtree whose behaviour is lent out to an update hook
    fn node_in_update(&self, id: NodeId) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&node| self.nodes.get(node).is_some_and(|node| node.behavior.is_none()))
    }

    /// Parent of `id`; `None` for the root or an unknown node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id` in insertion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Category of `id`; [`Category::NONE`] for an unknown node
    pub fn category(&self, id: NodeId) -> Category {
        self.nodes.get(id).map_or(Category::NONE, |node| node.category)
    }

    /// Local transform of `id`
    pub fn transform(&self, id: NodeId) -> Option<&Transformable> {
        self.nodes.get(id).map(|node| &node.transform)
    }

    /// Mutable local transform of `id`
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transformable> {
        self.nodes.get_mut(id).map(|node| &mut node.transform)
    }

    /// Product of every ancestor's local transform and the node's own, root first
    pub fn world_transform(&self, id: NodeId) -> Option<Transform2D> {
        let mut node = self.nodes.get(id)?;
        let mut transform = node.transform.transform();

        while let Some(parent) = node.parent.and_then(|parent| self.nodes.get(parent)) {
            transform = parent.transform.transform() * transform;
            node = parent;
        }

        Some(transform)
    }

    /// World-space position of the node's local origin
    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        self.world_transform(id)
            .map(|transform| transform.transform_point(Vec2::zeros()))
    }

    /// World-space bounding box; empty for nodes without one
    pub fn bounding_box(&self, id: NodeId) -> Rect {
        match (self.behavior_dyn(id), self.world_transform(id)) {
            (Some(behavior), Some(world)) => behavior.bounding_box(&world),
            _ => Rect::default(),
        }
    }

    fn behavior_dyn(&self, id: NodeId) -> Option<&(dyn NodeBehavior + 'static)> {
        self.nodes.get(id)?.behavior.as_deref()
    }

    fn behavior_dyn_mut(&mut self, id: NodeId) -> Option<&mut (dyn NodeBehavior + 'static)> {
        self.nodes.get_mut(id)?.behavior.as_deref_mut()
    }

    /// Downcast the behaviour of `id`
    pub fn behavior<T: NodeBehavior>(&self, id: NodeId) -> Option<&T> {
        self.behavior_dyn(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast the behaviour of `id`
    pub fn behavior_mut<T: NodeBehavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.behavior_dyn_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Gameplay state of `id`, if it carries any
    pub fn entity(&self, id: NodeId) -> Option<&Entity> {
        self.behavior_dyn(id)?.entity()
    }

    /// Mutable gameplay state of `id`, if it carries any
    pub fn entity_mut(&mut self, id: NodeId) -> Option<&mut Entity> {
        self.behavior_dyn_mut(id)?.entity_mut()
    }

    /// Whether the bounding boxes of `a` and `b` intersect
    pub fn collides(&self, a: NodeId, b: NodeId) -> bool {
        collision(&self.bounding_box(a), &self.bounding_box(b))
    }

    /// Distance between the world positions of `a` and `b`
    pub fn distance(&self, a: NodeId, b: NodeId) -> Option<f32> {
        Some((self.world_position(a)? - self.world_position(b)?).norm())
    }

    /// Whether `id` is destroyed
    pub fn is_destroyed(&self, id: NodeId) -> bool {
        self.behavior_dyn(id).is_some_and(|behavior| behavior.is_destroyed())
    }

    /// Whether the removal sweep would drop `id`
    pub fn is_marked_for_removal(&self, id: NodeId) -> bool {
        self.behavior_dyn(id).is_some_and(|behavior| behavior.is_marked_for_removal())
    }

    /// Remove `id` without any death effect (it disappears at the next sweep)
    pub fn remove(&mut self, id: NodeId) {
        if let Some(behavior) = self.behavior_dyn_mut(id) {
            behavior.remove();
        }
    }

    /// Nodes of the subtree rooted at `id` in pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                order.push(current);
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// Update the subtree rooted at `id`: each node's own hook, then its children
    pub fn update(&mut self, id: NodeId, dt: f32, commands: &mut CommandQueue) {
        let parent_world = self
            .parent(id)
            .and_then(|parent| self.world_transform(parent))
            .unwrap_or_default();
        self.update_node(id, parent_world, dt, commands);
    }

    fn update_node(&mut self, id: NodeId, parent_world: Transform2D, dt: f32, commands: &mut CommandQueue) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let mut transform = node.transform.clone();
        let children = node.children.clone();

        if let Some(mut behavior) = node.behavior.take() {
            let mut ctx = NodeContext {
                graph: self,
                id,
                transform: &mut transform,
                parent_world,
                commands,
            };
            behavior.update_current(&mut ctx, dt);

            // The node may have left the graph during its own hook
            let Some(node) = self.nodes.get_mut(id) else {
                return;
            };
            node.behavior = Some(behavior);
            node.transform = transform.clone();
        }

        let world = parent_world * transform.transform();
        for child in children {
            self.update_node(child, world, dt, commands);
        }
    }

    /// Deliver `command` to every node of the subtree at `id` whose category
    /// matches the command's mask, in pre-order
    pub fn on_command(&mut self, id: NodeId, command: &Command, dt: f32) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let children = node.children.clone();

        if node.category.matches(command.category) {
            command.execute(self, id, dt);
        }

        for child in children {
            self.on_command(child, command, dt);
        }
    }

    /// Drop every marked node (with its subtree) below `id`, recursively
    pub fn remove_wrecks(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut node.children);

        let (wrecks, survivors): (Vec<_>, Vec<_>) = children
            .into_iter()
            .partition(|&child| self.is_marked_for_removal(child));

        for wreck in wrecks {
            self.remove_subtree(wreck);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.children.clone_from(&survivors);
        }

        for survivor in survivors {
            self.remove_wrecks(survivor);
        }
    }

    /// Collect every unordered pair of nodes in the subtree at `scene_root`
    /// whose bounding boxes intersect and that are both alive.
    ///
    /// Pairs are keyed by node identity, so each colliding pair is reported
    /// once no matter how many times the walk meets it.
    pub fn check_scene_collision(&self, scene_root: NodeId, pairs: &mut BTreeSet<CollisionPair>) {
        let boxes = self.collision_boxes(scene_root);
        self.collide_scene(scene_root, scene_root, &boxes, pairs);
    }

    /// Collect every pair formed by `other` and a node in the subtree at `id`
    pub fn check_node_collision(&self, id: NodeId, other: NodeId, pairs: &mut BTreeSet<CollisionPair>) {
        let boxes = self.collision_boxes(self.root);
        self.collide_node(id, other, &boxes, pairs);
    }

    fn collide_scene(
        &self,
        scene_root: NodeId,
        node: NodeId,
        boxes: &SecondaryMap<NodeId, Rect>,
        pairs: &mut BTreeSet<CollisionPair>,
    ) {
        self.collide_node(scene_root, node, boxes, pairs);
        for &child in self.children(node) {
            self.collide_scene(scene_root, child, boxes, pairs);
        }
    }

    fn collide_node(
        &self,
        node: NodeId,
        other: NodeId,
        boxes: &SecondaryMap<NodeId, Rect>,
        pairs: &mut BTreeSet<CollisionPair>,
    ) {
        if node != other && !self.is_destroyed(node) && !self.is_destroyed(other) {
            if let (Some(a), Some(b)) = (boxes.get(node), boxes.get(other)) {
                if collision(a, b) {
                    pairs.insert(CollisionPair::new(node, other));
                }
            }
        }

        for &child in self.children(node) {
            self.collide_node(child, other, boxes, pairs);
        }
    }

    // One top-down pass so every box is computed from a single world transform walk.
    fn collision_boxes(&self, from: NodeId) -> SecondaryMap<NodeId, Rect> {
        let mut boxes = SecondaryMap::new();
        let parent_world = self
            .parent(from)
            .and_then(|parent| self.world_transform(parent))
            .unwrap_or_default();

        let mut stack = vec![(from, parent_world)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let world = parent_world * node.transform.transform();
            if let Some(behavior) = node.behavior.as_deref() {
                boxes.insert(id, behavior.bounding_box(&world));
            }
            stack.extend(node.children.iter().map(|&child| (child, world)));
        }

        boxes
    }

    /// Draw the subtree at `id`: each node after its parent, with `states`
    /// composed with the node's local transform
    pub fn draw(&self, id: NodeId, target: &mut dyn RenderTarget, states: &RenderStates) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let states = states.with_local(&node.transform.transform());

        if let Some(behavior) = node.behavior.as_deref() {
            behavior.draw_current(target, &states);

            if self.show_bounding_boxes {
                let rect = behavior.bounding_box(&states.transform);
                if rect.width > 0.0 && rect.height > 0.0 {
                    target.draw_rect_outline(rect, Color::CYAN);
                }
            }
        }

        for &child in &node.children {
            self.draw(child, target, &states);
        }
    }

    /// Draw the whole graph from the root
    pub fn draw_all(&self, target: &mut dyn RenderTarget) {
        self.draw(self.root, target, &RenderStates::default());
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
