// Sprite atlas description: a grid of equally sized cells in one image

use std::path::PathBuf;

use glam::Vec2;
use serde::Deserialize;

use super::AssetError;
use crate::core::math::Rect;

/// A resolved atlas: image name, pixel size and cell grid
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAtlas {
    /// Image resource name handed to the draw target
    pub image: String,

    /// Size of the whole atlas image (pixels)
    pub width: u32,
    pub height: u32,

    /// Grid layout
    pub cols: u32,
    pub rows: u32,

    /// Render scale factor (1.0 = original size)
    pub scale: f32,
}

impl SpriteAtlas {
    /// Create an atlas from an explicit grid
    pub fn new(image: &str, width: u32, height: u32, cols: u32, rows: u32) -> Self {
        Self {
            image: image.to_string(),
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
            scale: 1.0,
        }
    }

    /// Create an atlas of square cells
    pub fn with_cell(image: &str, width: u32, height: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        Self::new(image, width, height, width / cell, height / cell)
    }

    /// Set the render scale
    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Unscaled size of one cell
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 / self.cols as f32,
            self.height as f32 / self.rows as f32,
        )
    }

    /// On-screen size of one cell
    pub fn scaled_size(&self) -> Vec2 {
        self.tile_size() * self.scale
    }

    pub fn half_extents(&self) -> Vec2 {
        self.scaled_size() / 2.0
    }

    /// Number of cells in the atlas
    pub fn cell_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Source rectangle of a cell, row-major
    pub fn cell_source(&self, cell: u32) -> Rect {
        let tile = self.tile_size();
        let col = cell % self.cols;
        let row = cell / self.cols;
        Rect::from_origin_size(Vec2::new(tile.x * col as f32, tile.y * row as f32), tile)
    }
}

fn default_scale() -> f32 {
    1.0
}

/// Atlas as written in configuration.
///
/// Either `cell` or `cols`/`rows` describe the grid. Missing image
/// dimensions are read from the file at `path`.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasSpec {
    pub image: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub cols: Option<u32>,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub cell: Option<u32>,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl AtlasSpec {
    /// Resolve into a usable atlas, probing the image file if needed
    pub fn resolve(&self) -> Result<SpriteAtlas, AssetError> {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| AssetError::NotFound(self.image.clone()))?;
                image::image_dimensions(path)?
            }
        };

        let atlas = match (self.cell, self.cols, self.rows) {
            (Some(0), _, _) | (_, Some(0), _) | (_, _, Some(0)) => {
                return Err(AssetError::InvalidAtlas(format!(
                    "{}: grid dimensions must be non-zero",
                    self.image
                )));
            }
            (Some(cell), _, _) => SpriteAtlas::with_cell(&self.image, width, height, cell),
            (None, cols, rows) => {
                SpriteAtlas::new(&self.image, width, height, cols.unwrap_or(1), rows.unwrap_or(1))
            }
        };

        Ok(atlas.scaled(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_grid_from_cols_rows() {
        let atlas = SpriteAtlas::new("hero", 128, 64, 4, 2);
        assert_eq!(atlas.tile_size(), Vec2::new(32.0, 32.0));
        assert_eq!(atlas.cell_count(), 8);
    }

    #[test]
    fn test_square_cell_grid() {
        let atlas = SpriteAtlas::with_cell("tiles", 160, 96, 16);
        assert_eq!(atlas.cols, 10);
        assert_eq!(atlas.rows, 6);
    }

    #[test]
    fn test_cell_source_is_row_major() {
        let atlas = SpriteAtlas::new("hero", 128, 64, 4, 2);
        assert_eq!(atlas.cell_source(0), Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(atlas.cell_source(5), Rect::new(32.0, 32.0, 64.0, 64.0));
    }

    #[test]
    fn test_scaled_size() {
        let atlas = SpriteAtlas::new("hero", 128, 64, 4, 2).scaled(2.0);
        assert_eq!(atlas.scaled_size(), Vec2::new(64.0, 64.0));
        assert_eq!(atlas.half_extents(), Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_spec_with_explicit_size() {
        let spec: AtlasSpec = ron::from_str(
            r#"(image: "mob", width: Some(96), height: Some(128),
                cols: Some(3), rows: Some(4), scale: 2.0)"#,
        )
        .unwrap();
        let atlas = spec.resolve().unwrap();
        assert_eq!(atlas.tile_size(), Vec2::new(32.0, 32.0));
        assert_eq!(atlas.scale, 2.0);
    }

    #[test]
    fn test_spec_rejects_zero_grid() {
        let spec: AtlasSpec = ron::from_str(
            r#"(image: "bad", width: Some(10), height: Some(10), cell: Some(0))"#,
        )
        .unwrap();
        assert!(matches!(spec.resolve(), Err(AssetError::InvalidAtlas(_))));
    }

    #[test]
    fn test_spec_without_size_or_path() {
        let spec: AtlasSpec = ron::from_str(r#"(image: "ghost")"#).unwrap();
        assert!(matches!(spec.resolve(), Err(AssetError::NotFound(_))));
    }
}
