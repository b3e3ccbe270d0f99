//! Textures: identifiers, metadata and the texture manager

use super::resource_holder::{ResourceError, ResourceHolder, ResourceLoader};
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stable texture identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureId {
    /// Sprite sheet with aircraft, projectiles and pickups
    Entities,
    /// Tiled background
    Jungle,
    /// Particle sprite
    Particle,
    /// Explosion animation sheet
    Explosion,
    /// Finish line marker
    FinishLine,
}

impl TextureId {
    /// Every texture identifier
    pub const ALL: [Self; 5] = [
        Self::Entities,
        Self::Jungle,
        Self::Particle,
        Self::Explosion,
        Self::FinishLine,
    ];
}

/// Texture metadata known to the core.
///
/// Pixel data is owned by the render backend; the scene graph only needs the
/// size and whether the texture tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Source file, if the texture was loaded from disk
    pub path: Option<PathBuf>,
    /// Size in pixels
    pub width: u32,
    /// Size in pixels
    pub height: u32,
    /// Whether sampling outside the texture wraps around
    pub repeated: bool,
}

impl Texture {
    /// Create texture metadata without a backing file
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            path: None,
            width,
            height,
            repeated: false,
        }
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Loads texture metadata by reading the image header
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageTextureLoader;

impl ResourceLoader<Texture> for ImageTextureLoader {
    fn load(&self, path: &Path) -> Result<Texture, ResourceError> {
        let (width, height) = image::image_dimensions(path).map_err(|source| ResourceError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Texture {
            path: Some(path.to_path_buf()),
            width,
            height,
            repeated: false,
        })
    }
}

/// Texture table used by the game
pub type TextureManager = ResourceHolder<TextureId, Texture>;

impl TextureManager {
    /// Load a texture file and register it under `id`
    pub fn load_texture(&mut self, id: TextureId, path: impl AsRef<Path>) -> Result<(), ResourceError> {
        self.load(&ImageTextureLoader, id, path)
    }

    /// Fail unless every identifier in `ids` is registered
    pub fn require(&self, ids: impl IntoIterator<Item = TextureId>) -> Result<(), ResourceError> {
        for id in ids {
            self.get(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_path() {
        let mut textures = TextureManager::new();
        let err = textures
            .load_texture(TextureId::Jungle, "does/not/exist.png")
            .unwrap_err();

        assert!(err.to_string().contains("does/not/exist.png"));
        assert!(!textures.contains(TextureId::Jungle));
    }

    #[test]
    fn test_require_reports_first_missing() {
        let mut textures = TextureManager::new();
        textures.insert(TextureId::Entities, Texture::with_size(64, 64)).unwrap();

        assert!(textures.require([TextureId::Entities]).is_ok());
        assert!(matches!(
            textures.require([TextureId::Entities, TextureId::Particle]),
            Err(ResourceError::NotFound(_))
        ));
    }
}
