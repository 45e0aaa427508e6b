// Asset descriptions
//
// Sprite atlases and tilesets. Image pixels stay with the draw target;
// this layer only knows names, sizes and cell grids.

mod atlas;
mod tileset;

pub use atlas::{AtlasSpec, SpriteAtlas};
pub use tileset::{TileAnimation, TileGrid, TileSet};

/// Failures resolving an atlas description
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// No size given and no file to probe
    #[error("No image to read for atlas {0}")]
    NotFound(String),

    #[error("Invalid atlas: {0}")]
    InvalidAtlas(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_atlas() {
        let err = AssetError::NotFound("slime".to_string());
        assert_eq!(err.to_string(), "No image to read for atlas slime");
    }
}
