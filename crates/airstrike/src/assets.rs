//! Game textures

use std::path::Path;

use airstrike_engine::assets::{Texture, TextureId, TextureManager};

use crate::error::Result;

/// File name of each texture inside the media directory
pub fn texture_file(id: TextureId) -> &'static str {
    match id {
        TextureId::Entities => "Entities.png",
        TextureId::Jungle => "Jungle.png",
        TextureId::Particle => "Particle.png",
        TextureId::Explosion => "Explosion.png",
        TextureId::FinishLine => "FinishLine.png",
    }
}

/// Load every texture from `media_dir`
pub fn load_textures(media_dir: impl AsRef<Path>) -> Result<TextureManager> {
    let media_dir = media_dir.as_ref();
    let mut textures = TextureManager::new();
    for id in TextureId::ALL {
        textures.load_texture(id, media_dir.join(texture_file(id)))?;
    }
    log::info!("Loaded {} textures from {}", textures.len(), media_dir.display());
    Ok(textures)
}

/// Texture table with the stock sheet sizes and no backing files.
///
/// Enough for simulation without a render backend.
pub fn placeholder_textures() -> TextureManager {
    let mut textures = TextureManager::new();
    for id in TextureId::ALL {
        let (width, height) = match id {
            TextureId::Entities => (512, 256),
            TextureId::Jungle | TextureId::Explosion => (1024, 1024),
            TextureId::Particle => (8, 8),
            TextureId::FinishLine => (600, 76),
        };
        if let Err(err) = textures.insert(id, Texture::with_size(width, height)) {
            log::warn!("Skipping placeholder texture: {err}");
        }
    }
    textures
}
