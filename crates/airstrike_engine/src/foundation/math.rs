//! Math utilities and types
//!
//! Provides the 2D math types used by the scene graph: vectors, homogeneous
//! transforms, transformable node state and axis-aligned rectangles.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (homogeneous 2D transform)
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Composed 2D transform stored as a homogeneous 3x3 matrix.
///
/// Composition follows the usual convention: `parent * child` applies the
/// child transform first and the parent transform afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Homogeneous matrix
    pub matrix: Mat3,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transform
    pub fn identity() -> Self {
        Self { matrix: Mat3::identity() }
    }

    /// Pure translation
    pub fn from_translation(offset: Vec2) -> Self {
        Self { matrix: Mat3::new_translation(&offset) }
    }

    /// Combine with another transform (`self` applied after `other`)
    pub fn combine(&self, other: &Self) -> Self {
        Self { matrix: self.matrix * other.matrix }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point(&Point2::from(point)).coords
    }

    /// Apply this transform to a direction (translation ignored)
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.matrix.transform_vector(&vector)
    }

    /// Transform a rectangle and return the axis-aligned box enclosing the result
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.transform_point(Vec2::new(rect.left, rect.top)),
            self.transform_point(Vec2::new(rect.left, rect.bottom())),
            self.transform_point(Vec2::new(rect.right(), rect.top)),
            self.transform_point(Vec2::new(rect.right(), rect.bottom())),
        ];

        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.inf(corner);
            max = max.sup(corner);
        }

        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

impl Mul for Transform2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.combine(&rhs)
    }
}

/// Local placement of a scene node: position, rotation and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transformable {
    /// Position relative to the parent node
    pub position: Vec2,

    /// Clockwise rotation in degrees (screen space, y pointing down)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transformable {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transformable {
    /// Create a transformable placed at `position`
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Offset the position
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Add to the current rotation, keeping it in `[0, 360)`
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
    }

    /// Set the rotation, keeping it in `[0, 360)`
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    /// Local transform: translate * rotate * scale
    pub fn transform(&self) -> Transform2D {
        let matrix = Mat3::new_translation(&self.position)
            * Mat3::new_rotation(utils::to_radian(self.rotation))
            * Mat3::new_nonuniform_scaling(&self.scale);
        Transform2D { matrix }
    }
}

/// Axis-aligned rectangle (left/top corner plus size)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its corner and size
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Create a rectangle from a corner position and a size vector
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if the rectangle contains a point (right/bottom edges exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// Check if two rectangles overlap with a non-empty area.
    ///
    /// Touching edges and zero-sized rectangles never intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        left < right && top < bottom
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn to_radian(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn to_degree(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Vector length
    pub fn length(vector: Vec2) -> f32 {
        vector.norm()
    }

    /// Unit vector pointing along `vector`; the zero vector maps to itself
    pub fn unit_vector(vector: Vec2) -> Vec2 {
        let length = vector.norm();
        if length > 0.0 {
            vector / length
        } else {
            vector
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_transformable_translation() {
        let node = Transformable::from_position(Vec2::new(10.0, 20.0));
        let point = node.transform().transform_point(Vec2::new(1.0, 2.0));

        assert_relative_eq!(point, Vec2::new(11.0, 22.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_is_clockwise_in_screen_space() {
        let mut node = Transformable::default();
        node.set_rotation(90.0);

        // +x rotated clockwise (y down) lands on +y
        let point = node.transform().transform_point(Vec2::new(1.0, 0.0));
        assert_relative_eq!(point, Vec2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut node = Transformable::default();
        node.set_rotation(180.0);
        node.rotate(270.0);

        assert_relative_eq!(node.rotation, 90.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Shared edge only
        assert!(!a.intersects(&c));
        // Empty rectangles never collide
        assert!(!Rect::default().intersects(&Rect::default()));
    }

    #[test]
    fn test_transform_rect_encloses_rotated_box() {
        let mut node = Transformable::from_position(Vec2::new(100.0, 100.0));
        node.set_rotation(90.0);

        let rect = node.transform().transform_rect(&Rect::new(-10.0, -5.0, 20.0, 10.0));
        assert_relative_eq!(rect.left, 95.0, epsilon = EPSILON);
        assert_relative_eq!(rect.top, 90.0, epsilon = EPSILON);
        assert_relative_eq!(rect.width, 10.0, epsilon = EPSILON);
        assert_relative_eq!(rect.height, 20.0, epsilon = EPSILON);
    }

    #[test]
    fn test_unit_vector() {
        assert_relative_eq!(utils::unit_vector(Vec2::new(3.0, 4.0)), Vec2::new(0.6, 0.8), epsilon = EPSILON);
        assert_eq!(utils::unit_vector(Vec2::zeros()), Vec2::zeros());
    }
}
