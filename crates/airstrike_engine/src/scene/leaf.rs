//! Leaf nodes that only draw

use super::category::Category;
use super::node::NodeBehavior;
use crate::foundation::math::{Rect, Transform2D};
use crate::render::{RenderStates, RenderTarget, Sprite, Text};

/// Static sprite, e.g. the background or the finish line
#[derive(Debug, Clone)]
pub struct SpriteNode {
    /// Displayed sprite
    pub sprite: Sprite,
}

impl SpriteNode {
    /// Node showing `sprite`
    pub fn new(sprite: Sprite) -> Self {
        Self { sprite }
    }
}

impl NodeBehavior for SpriteNode {
    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        target.draw_sprite(&self.sprite, states);
    }
}

/// Text label, e.g. an aircraft's hit point display
#[derive(Debug, Clone)]
pub struct TextNode {
    text: Text,
}

impl TextNode {
    /// Node showing `string`
    pub fn new(string: impl Into<String>) -> Self {
        Self { text: Text::new(string) }
    }

    /// Displayed string
    pub fn string(&self) -> &str {
        &self.text.string
    }

    /// Replace the displayed string
    pub fn set_string(&mut self, string: impl Into<String>) {
        self.text.string = string.into();
    }
}

impl NodeBehavior for TextNode {
    fn category(&self) -> Category {
        Category::NONE
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        if !self.text.string.is_empty() {
            target.draw_text(&self.text, states);
        }
    }

    fn bounding_box(&self, _world: &Transform2D) -> Rect {
        Rect::default()
    }
}
