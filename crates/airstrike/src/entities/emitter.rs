//! Particle emitter node
//!
//! Emitters ride on moving nodes (missiles) and feed particles into the
//! matching container elsewhere in the graph. The container is located once
//! through a command addressed to every particle system.

use airstrike_engine::command::Command;
use airstrike_engine::scene::{Category, NodeBehavior, NodeContext, NodeId, SceneGraph};

use super::particle::ParticleNode;
use crate::data_tables::ParticleType;

/// Particles emitted per second
pub const EMISSION_RATE: f32 = 30.0;

/// Emits particles of one type at its world position
#[derive(Debug, Clone)]
pub struct EmitterNode {
    kind: ParticleType,
    accumulated_time: f32,
    particle_system: Option<NodeId>,
}

impl EmitterNode {
    /// Emitter for `kind`
    pub fn new(kind: ParticleType) -> Self {
        Self {
            kind,
            accumulated_time: 0.0,
            particle_system: None,
        }
    }

    /// Container the emitter feeds, once found
    pub fn particle_system(&self) -> Option<NodeId> {
        self.particle_system
    }

    fn finder(&self, emitter: NodeId) -> Command {
        let kind = self.kind;
        Command::new(Category::PARTICLE_SYSTEM, move |graph: &mut SceneGraph, node: NodeId, _dt: f32| {
            let matches = graph
                .behavior::<ParticleNode>(node)
                .is_some_and(|container| container.kind() == kind);

            if matches {
                if let Some(emitter) = graph.behavior_mut::<EmitterNode>(emitter) {
                    emitter.particle_system = Some(node);
                }
            }
        })
    }
}

impl NodeBehavior for EmitterNode {
    fn update_current(&mut self, ctx: &mut NodeContext<'_>, dt: f32) {
        let system = self
            .particle_system
            .filter(|&id| ctx.graph.behavior::<ParticleNode>(id).is_some());

        let Some(system) = system else {
            self.particle_system = None;
            let finder = self.finder(ctx.id);
            ctx.push(finder);
            return;
        };

        let interval = 1.0 / EMISSION_RATE;
        let position = ctx.world_position();
        self.accumulated_time += dt;

        while self.accumulated_time > interval {
            self.accumulated_time -= interval;
            if let Some(container) = ctx.graph.behavior_mut::<ParticleNode>(system) {
                container.add_particle(position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_tables::DataTables;
    use airstrike_engine::assets::TextureId;
    use airstrike_engine::command::CommandQueue;
    use airstrike_engine::foundation::math::Vec2;
    use airstrike_engine::scene::NodeTree;

    fn container(kind: ParticleType) -> NodeTree {
        let data = DataTables::default().particles[kind].clone();
        NodeTree::new(ParticleNode::new(kind, data, TextureId::Particle, Vec2::new(8.0, 8.0)))
    }

    #[test]
    fn test_emitter_finds_matching_container_and_emits() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let smoke = graph.attach_child(root, container(ParticleType::Smoke)).unwrap();
        let propellant = graph.attach_child(root, container(ParticleType::Propellant)).unwrap();
        let emitter = graph
            .attach_child(root, NodeTree::new(EmitterNode::new(ParticleType::Propellant)).at(Vec2::new(5.0, 7.0)))
            .unwrap();
        let mut commands = CommandQueue::new();

        graph.update(root, 0.1, &mut commands);
        assert_eq!(commands.len(), 1);
        while let Some(command) = commands.pop() {
            graph.on_command(root, &command, 0.1);
        }
        assert_eq!(graph.behavior::<EmitterNode>(emitter).unwrap().particle_system(), Some(propellant));

        // 0.1 s at 30 per second
        graph.update(root, 0.1, &mut commands);
        assert!(commands.is_empty());

        let emitted = graph.behavior::<ParticleNode>(propellant).unwrap();
        assert!((2..=3).contains(&emitted.len()));
        assert!(emitted.particles().all(|p| p.position == Vec2::new(5.0, 7.0)));
        assert!(graph.behavior::<ParticleNode>(smoke).unwrap().is_empty());
    }

    #[test]
    fn test_emitter_searches_again_after_container_removed() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let smoke = graph.attach_child(root, container(ParticleType::Smoke)).unwrap();
        let emitter = graph
            .attach_child(root, NodeTree::new(EmitterNode::new(ParticleType::Smoke)))
            .unwrap();
        let mut commands = CommandQueue::new();

        graph.update(root, 0.1, &mut commands);
        while let Some(command) = commands.pop() {
            graph.on_command(root, &command, 0.1);
        }
        graph.detach_child(root, smoke).unwrap();

        graph.update(root, 0.1, &mut commands);
        assert_eq!(commands.len(), 1);
        assert!(graph.behavior::<EmitterNode>(emitter).unwrap().particle_system().is_none());
    }
}
