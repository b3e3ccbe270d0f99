//! Render sink contract
//!
//! The scene graph draws itself into any [`RenderTarget`]. The renderer is a
//! passive consumer:
//! - Accepts pre-computed transforms (no scene logic)
//! - Accepts texture identifiers (no resource ownership)
//! - Only handles drawing (no window, device or timing)

mod draw_list;
mod sprite;

pub use draw_list::{DrawCommand, DrawList};
pub use sprite::{Sprite, Text};

use crate::assets::TextureId;
use crate::foundation::math::{Rect, Transform2D};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Cyan, used for bounding box outlines
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    /// Create an opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Copy of this colour with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Textured, coloured vertex in world coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World position
    pub position: [f32; 2],
    /// Texture coordinates in pixels
    pub tex_coords: [f32; 2],
    /// RGBA colour
    pub color: [u8; 4],
}

impl Vertex {
    /// Create a vertex
    pub fn new(position: [f32; 2], tex_coords: [f32; 2], color: Color) -> Self {
        Self {
            position,
            tex_coords,
            color: [color.r, color.g, color.b, color.a],
        }
    }
}

/// State accumulated while walking the scene graph for drawing
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStates {
    /// Accumulated world transform
    pub transform: Transform2D,
}

impl RenderStates {
    /// States with `local` applied on top of the current transform
    pub fn with_local(&self, local: &Transform2D) -> Self {
        Self {
            transform: self.transform * *local,
        }
    }
}

/// Externally provided render target
pub trait RenderTarget {
    /// Select the world-space rectangle mapped onto the target
    fn set_view(&mut self, _view: Rect) {}

    /// Draw a sprite with the given states
    fn draw_sprite(&mut self, sprite: &Sprite, states: &RenderStates);

    /// Draw a text label with the given states
    fn draw_text(&mut self, text: &Text, states: &RenderStates);

    /// Draw textured quads (four vertices per quad) already in world space
    fn draw_quads(&mut self, texture: TextureId, vertices: &[Vertex]);

    /// Draw a debug rectangle outline in world space
    fn draw_rect_outline(&mut self, rect: Rect, color: Color);
}
