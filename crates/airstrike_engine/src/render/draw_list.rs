//! Recording render target
//!
//! Collects the draw calls of one frame so a backend can submit them later,
//! or so tests can inspect what the scene graph drew.

use super::{Color, RenderStates, RenderTarget, Sprite, Text, Vertex};
use crate::assets::TextureId;
use crate::foundation::math::{Rect, Transform2D};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Sprite with its world transform
    Sprite {
        /// Sprite as drawn
        sprite: Sprite,
        /// World transform at draw time
        transform: Transform2D,
    },
    /// Text label with its world transform
    Text {
        /// Label as drawn
        text: Text,
        /// World transform at draw time
        transform: Transform2D,
    },
    /// Batch of textured quads
    Quads {
        /// Texture sampled by the quads
        texture: TextureId,
        /// Vertices, four per quad
        vertices: Vec<Vertex>,
    },
    /// Debug outline
    RectOutline {
        /// Outlined rectangle
        rect: Rect,
        /// Outline colour
        color: Color,
    },
}

/// Render target that records draw calls in submission order
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    view: Option<Rect>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was drawn
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sprites drawn with `texture`
    pub fn sprite_count(&self, texture: TextureId) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Sprite { sprite, .. } if sprite.texture == texture))
            .count()
    }

    /// View selected for the frame, if any
    pub fn view(&self) -> Option<Rect> {
        self.view
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
        self.view = None;
    }
}

impl RenderTarget for DrawList {
    fn set_view(&mut self, view: Rect) {
        self.view = Some(view);
    }

    fn draw_sprite(&mut self, sprite: &Sprite, states: &RenderStates) {
        self.commands.push(DrawCommand::Sprite {
            sprite: sprite.clone(),
            transform: states.transform,
        });
    }

    fn draw_text(&mut self, text: &Text, states: &RenderStates) {
        self.commands.push(DrawCommand::Text {
            text: text.clone(),
            transform: states.transform,
        });
    }

    fn draw_quads(&mut self, texture: TextureId, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Quads {
            texture,
            vertices: vertices.to_vec(),
        });
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::RectOutline { rect, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order_and_skips_empty_quads() {
        let mut list = DrawList::new();
        list.set_view(Rect::new(0.0, 0.0, 600.0, 400.0));
        list.draw_quads(TextureId::Particle, &[]);
        list.draw_sprite(
            &Sprite::new(TextureId::Entities, Rect::new(0.0, 0.0, 48.0, 64.0)),
            &RenderStates::default(),
        );
        list.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0), Color::CYAN);

        assert_eq!(list.len(), 2);
        assert_eq!(list.sprite_count(TextureId::Entities), 1);
        assert!(matches!(list.commands()[1], DrawCommand::RectOutline { .. }));
        assert_eq!(list.view(), Some(Rect::new(0.0, 0.0, 600.0, 400.0)));

        list.clear();
        assert!(list.is_empty());
        assert!(list.view().is_none());
    }
}
