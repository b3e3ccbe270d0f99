//! Sprite sheet animation

use airstrike_engine::foundation::math::Rect;
use airstrike_engine::render::Sprite;

use crate::data_tables::ExplosionData;

/// Frame-by-frame animation over a sprite sheet laid out in rows
#[derive(Debug, Clone)]
pub struct Animation {
    sprite: Sprite,
    frame_width: f32,
    frame_height: f32,
    num_frames: u32,
    columns: u32,
    duration: f32,
    current_frame: u32,
    elapsed: f32,
    repeat: bool,
}

impl Animation {
    /// One-shot animation described by `data`, centred on its node
    pub fn from_explosion(data: &ExplosionData) -> Self {
        let mut sprite = Sprite::new(data.texture, Rect::new(0.0, 0.0, data.frame_width, data.frame_height));
        sprite.center_origin();

        Self {
            sprite,
            frame_width: data.frame_width,
            frame_height: data.frame_height,
            num_frames: data.num_frames,
            columns: data.columns.max(1),
            duration: data.duration,
            current_frame: 0,
            elapsed: 0.0,
            repeat: false,
        }
    }

    /// Loop instead of stopping on the last frame
    pub fn set_repeating(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Index of the frame shown now
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// One-shot animations finish after their last frame
    pub fn is_finished(&self) -> bool {
        !self.repeat && self.current_frame >= self.num_frames
    }

    /// Sprite showing the current frame
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.num_frames == 0 {
            return;
        }

        let time_per_frame = self.duration / self.num_frames as f32;
        self.elapsed += dt;

        while self.elapsed >= time_per_frame && (self.repeat || self.current_frame < self.num_frames) {
            self.elapsed -= time_per_frame;
            self.current_frame = if self.repeat {
                (self.current_frame + 1) % self.num_frames
            } else {
                self.current_frame + 1
            };
        }

        let shown = self.current_frame.min(self.num_frames - 1);
        let column = shown % self.columns;
        let row = shown / self.columns;
        self.sprite.set_texture_rect(Rect::new(
            column as f32 * self.frame_width,
            row as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airstrike_engine::assets::TextureId;

    fn explosion() -> ExplosionData {
        ExplosionData {
            texture: TextureId::Explosion,
            frame_width: 256.0,
            frame_height: 256.0,
            num_frames: 16,
            columns: 4,
            duration: 1.0,
        }
    }

    #[test]
    fn test_frames_advance_across_rows() {
        let mut animation = Animation::from_explosion(&explosion());
        animation.update(5.0 / 16.0 + 0.001);

        assert_eq!(animation.current_frame(), 5);
        assert_eq!(animation.sprite().texture_rect, Rect::new(256.0, 256.0, 256.0, 256.0));
        assert!(!animation.is_finished());
    }

    #[test]
    fn test_one_shot_finishes() {
        let mut animation = Animation::from_explosion(&explosion());
        for _ in 0..70 {
            animation.update(1.0 / 60.0);
        }

        assert!(animation.is_finished());
        assert_eq!(animation.sprite().texture_rect, Rect::new(768.0, 768.0, 256.0, 256.0));
    }

    #[test]
    fn test_repeating_wraps() {
        let mut animation = Animation::from_explosion(&explosion());
        animation.set_repeating(true);
        animation.update(17.0 / 16.0 + 0.001);

        assert_eq!(animation.current_frame(), 1);
        assert!(!animation.is_finished());
    }
}
