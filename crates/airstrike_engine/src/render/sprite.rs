//! Drawable primitives referenced by scene nodes

use crate::assets::TextureId;
use crate::foundation::math::{Rect, Vec2};

/// Textured rectangle cut from a texture
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Source texture
    pub texture: TextureId,
    /// Region of the texture to display, in pixels
    pub texture_rect: Rect,
    /// Local origin the sprite is positioned and rotated around
    pub origin: Vec2,
}

impl Sprite {
    /// Create a sprite showing `texture_rect` of `texture`
    pub fn new(texture: TextureId, texture_rect: Rect) -> Self {
        Self {
            texture,
            texture_rect,
            origin: Vec2::zeros(),
        }
    }

    /// Move the origin to the centre of the sprite
    pub fn center_origin(&mut self) {
        self.origin = Vec2::new(self.texture_rect.width / 2.0, self.texture_rect.height / 2.0);
    }

    /// Change the displayed texture region, keeping the origin
    pub fn set_texture_rect(&mut self, rect: Rect) {
        self.texture_rect = rect;
    }

    /// Bounds in the sprite's own coordinate space (origin ignored)
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.texture_rect.width.abs(), self.texture_rect.height.abs())
    }

    /// Bounds in the owning node's coordinate space (origin applied)
    pub fn global_bounds(&self) -> Rect {
        let local = self.local_bounds();
        Rect::new(-self.origin.x, -self.origin.y, local.width, local.height)
    }
}

/// Short text label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Displayed string
    pub string: String,
    /// Character size in pixels
    pub character_size: u32,
}

impl Text {
    /// Create a label
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            character_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_bounds() {
        let mut sprite = Sprite::new(TextureId::Entities, Rect::new(144.0, 0.0, 84.0, 64.0));
        sprite.center_origin();

        assert_eq!(sprite.global_bounds(), Rect::new(-42.0, -32.0, 84.0, 64.0));
        assert_eq!(sprite.local_bounds(), Rect::new(0.0, 0.0, 84.0, 64.0));
    }
}
