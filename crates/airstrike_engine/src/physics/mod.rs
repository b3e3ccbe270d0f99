//! Collision resolution helpers
//!
//! Detection walks the scene graph (see [`SceneGraph::check_scene_collision`]);
//! this module holds the pair type and the category matching used when
//! resolving the detected pairs.

use crate::foundation::math::Rect;
use crate::scene::{Category, NodeId, SceneGraph};

/// Unordered pair of colliding nodes.
///
/// Always stores the smaller id first, so `(a, b)` and `(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair {
    /// First node
    pub first: NodeId,
    /// Second node
    pub second: NodeId,
}

impl CollisionPair {
    /// Create a pair in canonical order
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Whether `id` is one of the two nodes
    pub fn contains(&self, id: NodeId) -> bool {
        self.first == id || self.second == id
    }

    /// Check whether the pair is made of a node matching `type_a` and one
    /// matching `type_b`.
    ///
    /// On success the slots are swapped if needed so that `first` is the
    /// `type_a` node. Unequal categories are tried in the stored order first.
    pub fn matches_categories(&mut self, graph: &SceneGraph, type_a: Category, type_b: Category) -> bool {
        let category_1 = graph.category(self.first);
        let category_2 = graph.category(self.second);

        if category_1.matches(type_a) && category_2.matches(type_b) {
            true
        } else if category_1.matches(type_b) && category_2.matches(type_a) {
            std::mem::swap(&mut self.first, &mut self.second);
            true
        } else {
            false
        }
    }
}

/// Whether two world-space boxes overlap (touching edges do not count)
pub fn collision(lhs: &Rect, rhs: &Rect) -> bool {
    lhs.intersects(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Group, NodeTree};

    fn graph_with(categories: &[Category]) -> (SceneGraph, Vec<NodeId>) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let ids = categories
            .iter()
            .map(|&category| graph.attach_child(root, NodeTree::new(Group::new(category))).unwrap())
            .collect();
        (graph, ids)
    }

    #[test]
    fn test_pair_is_unordered() {
        let (_, ids) = graph_with(&[Category::PICKUP, Category::PLAYER_AIRCRAFT]);
        assert_eq!(CollisionPair::new(ids[0], ids[1]), CollisionPair::new(ids[1], ids[0]));
        assert!(CollisionPair::new(ids[1], ids[0]).contains(ids[0]));
    }

    #[test]
    fn test_matches_categories_swaps_into_query_order() {
        let (graph, ids) = graph_with(&[Category::PICKUP, Category::PLAYER_AIRCRAFT]);
        let (pickup, player) = (ids[0], ids[1]);

        let mut pair = CollisionPair::new(pickup, player);
        assert!(pair.matches_categories(&graph, Category::PLAYER_AIRCRAFT, Category::PICKUP));
        assert_eq!(pair.first, player);
        assert_eq!(pair.second, pickup);

        let mut pair = CollisionPair::new(pickup, player);
        assert!(pair.matches_categories(&graph, Category::PICKUP, Category::PLAYER_AIRCRAFT));
        assert_eq!(pair.first, pickup);
    }

    #[test]
    fn test_matches_categories_rejects_other_pairs() {
        let (graph, ids) = graph_with(&[Category::ENEMY_PROJECTILE, Category::ENEMY_AIRCRAFT]);

        let mut pair = CollisionPair::new(ids[0], ids[1]);
        let before = pair;
        assert!(!pair.matches_categories(&graph, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT));
        assert_eq!(pair, before);
    }

    #[test]
    fn test_matches_categories_accepts_composite_masks() {
        let (graph, ids) = graph_with(&[Category::ALLIED_PROJECTILE, Category::ENEMY_AIRCRAFT]);

        let mut pair = CollisionPair::new(ids[0], ids[1]);
        assert!(pair.matches_categories(&graph, Category::AIRCRAFT, Category::PROJECTILE));
        assert_eq!(pair.first, ids[1]);
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!collision(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(collision(&a, &Rect::new(9.0, 9.0, 10.0, 10.0)));
    }
}
