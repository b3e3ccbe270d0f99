//! Command queue
//!
//! Commands are the only way gameplay code reaches nodes it does not own: a
//! command names the categories it addresses and carries an action that the
//! scene graph runs on every matching node during dispatch.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::scene::{Category, NodeBehavior, NodeId, SceneGraph};

/// Action run on each receiving node: graph, receiving node, tick delta
pub type Action = dyn Fn(&mut SceneGraph, NodeId, f32);

/// Category-addressed action
#[derive(Clone)]
pub struct Command {
    /// Categories this command is delivered to
    pub category: Category,
    action: Rc<Action>,
}

impl Command {
    /// Command running `action` on every node matching `category`
    pub fn new(category: Category, action: impl Fn(&mut SceneGraph, NodeId, f32) + 'static) -> Self {
        Self {
            category,
            action: Rc::new(action),
        }
    }

    /// Command whose action expects a concrete behaviour type.
    ///
    /// Receivers of another type are skipped with a warning.
    pub fn for_behavior<T, F>(category: Category, action: F) -> Self
    where
        T: NodeBehavior,
        F: Fn(&mut T, f32) + 'static,
    {
        Self::new(category, derived_action(action))
    }

    /// Run the action on `node`
    pub fn execute(&self, graph: &mut SceneGraph, node: NodeId, dt: f32) {
        (self.action)(graph, node, dt);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Adapt an action on a concrete behaviour type into a graph action
pub fn derived_action<T, F>(action: F) -> impl Fn(&mut SceneGraph, NodeId, f32) + 'static
where
    T: NodeBehavior,
    F: Fn(&mut T, f32) + 'static,
{
    move |graph: &mut SceneGraph, node: NodeId, dt: f32| match graph.behavior_mut::<T>(node) {
        Some(behavior) => action(behavior, dt),
        None => log::warn!(
            "Command for {} delivered to node {:?} of another type",
            std::any::type_name::<T>(),
            node
        ),
    }
}

/// FIFO of pending commands
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Take the oldest command
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    /// Whether no command is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop every pending command
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
