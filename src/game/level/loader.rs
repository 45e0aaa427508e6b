// Tiled TMX map translation
//
// Reads the XML document produced by the Tiled editor and builds a
// `Level` from it. Only CSV-encoded tile layers are understood.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use log::{debug, error, info};
use roxmltree::{Document, Node};
use thiserror::Error;

use super::{ImageLayer, Layer, Level, Portal, Stair};
use crate::core::math::Rect;
use crate::engine::assets::{TileGrid, TileSet};
use crate::engine::renderer::ImageRepeat;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed map XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Root element must be <map>, found <{0}>")]
    NotAMap(String),
    #[error("Map refers to unknown tileset: {0}")]
    UnknownTileset(String),
    #[error("<{element}> is missing attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("<{element}> has invalid {attribute}={value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },
    #[error("Layer {layer} has invalid tile data: {token:?}")]
    InvalidTileData { layer: String, token: String },
    #[error("Layer {0} uses an unsupported encoding: {1}")]
    UnsupportedEncoding(String, String),
    #[error("Stairs {0} need a polygon of four points")]
    InvalidStairs(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds levels from TMX text against a registry of known tilesets
pub struct LevelLoader<'a> {
    /// Tilesets keyed by the `source` the map refers to them by
    tilesets: &'a HashMap<String, TileSet>,
    /// Prepended to image sources that are not `#` references
    prefix: String,
    scale: f32,
}

impl<'a> LevelLoader<'a> {
    pub fn new(tilesets: &'a HashMap<String, TileSet>) -> Self {
        Self {
            tilesets,
            prefix: String::new(),
            scale: 1.0,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Parse into a fresh, entropy-seeded level
    pub fn parse(&self, xml: &str) -> Result<Level, LoadError> {
        self.parse_into(xml, Level::new())
    }

    pub fn load_file(&self, path: impl AsRef<Path>, level: Level) -> Result<Level, LoadError> {
        let xml = std::fs::read_to_string(path)?;
        self.parse_into(&xml, level)
    }

    /// Fill `level` (usually empty, carrying the caller's random source)
    /// from the map document
    pub fn parse_into(&self, xml: &str, mut level: Level) -> Result<Level, LoadError> {
        let doc = Document::parse(xml)?;
        let map = doc.root_element();
        if map.tag_name().name() != "map" {
            return Err(LoadError::NotAMap(map.tag_name().name().to_string()));
        }

        let offset = find_center(&doc)?.unwrap_or(Vec2::ZERO);
        level.offset = offset;
        level.scale = self.scale;

        for node in map.children().filter(|node| node.is_element()) {
            match node.tag_name().name() {
                "tileset" => self.read_tileset(node, &mut level)?,
                "imagelayer" => self.read_image_layer(node, &mut level)?,
                "layer" => read_tile_layer(node, &mut level)?,
                "objectgroup" => self.read_objects(node, offset, &mut level)?,
                other => debug!("skipping <{}> in map", other),
            }
        }

        level.precalc_stairs();

        info!(
            "Loaded level: {} layers, {} tilesets, {} spawn categories, {} stairs, {} portals",
            level.layers().len(),
            level.tilesets().len(),
            level.spawn_categories().count(),
            level.stairs().len(),
            level.portals().len()
        );

        Ok(level)
    }

    fn read_tileset(&self, node: Node<'_, '_>, level: &mut Level) -> Result<(), LoadError> {
        let Some(source) = node.attribute("source") else {
            debug!("skipping embedded tileset");
            return Ok(());
        };
        let first_gid: u32 = required_attr(node, "firstgid")?;
        let tileset = self
            .tilesets
            .get(source)
            .ok_or_else(|| LoadError::UnknownTileset(source.to_string()))?;
        level.add_tileset(source, tileset.clone(), first_gid);
        Ok(())
    }

    fn read_image_layer(&self, node: Node<'_, '_>, level: &mut Level) -> Result<(), LoadError> {
        let Some(image) = node.children().find(|child| child.has_tag_name("image")) else {
            return Ok(());
        };
        let (Some(name), Some(source)) = (node.attribute("name"), image.attribute("source")) else {
            return Ok(());
        };

        let source = if source.starts_with('#') {
            source.to_string()
        } else {
            format!("{}{}", self.prefix, source)
        };

        let layer = ImageLayer {
            image: source,
            size: Vec2::new(
                attr_or(image, "width", 0.0)?,
                attr_or(image, "height", 0.0)?,
            ),
            repeat: ImageRepeat {
                x: attr_or(node, "repeatx", 0)? != 0,
                y: attr_or(node, "repeaty", 0)? != 0,
            },
            parallax: Vec2::new(
                attr_or(node, "parallaxx", 0.0)?,
                attr_or(node, "parallaxy", 0.0)?,
            ),
        };
        level.push_layer(Layer::image(name, layer));
        Ok(())
    }

    fn read_objects(
        &self,
        group: Node<'_, '_>,
        offset: Vec2,
        level: &mut Level,
    ) -> Result<(), LoadError> {
        level.push_layer(Layer::objects());

        for object in group.children().filter(|node| node.has_tag_name("object")) {
            let raw_name = object.attribute("name").unwrap_or_default();
            let at = Vec2::new(attr_or(object, "x", 0.0)?, attr_or(object, "y", 0.0)?);
            let at = (at - offset) * self.scale;

            match object_type(object).to_lowercase().as_str() {
                "spawn" => level.add_spawn_point(&raw_name.to_lowercase(), at),
                "stairs" => {
                    let points = stair_points(object, raw_name)?;
                    level.add_stair(Stair::new(points.map(|p| at + p * self.scale)));
                }
                "portal" => {
                    let size = Vec2::new(
                        attr_or(object, "width", 0.0)?,
                        attr_or(object, "height", 0.0)?,
                    ) * self.scale;
                    let rect = Rect::from_origin_size(at, size);
                    match Portal::from_name(raw_name, rect) {
                        Some(portal) => level.add_portal(portal),
                        None => error!("Bad portal name {:?}, expected map.spawn", raw_name),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn read_tile_layer(node: Node<'_, '_>, level: &mut Level) -> Result<(), LoadError> {
    let Some(data) = node.children().find(|child| child.has_tag_name("data")) else {
        return Ok(());
    };

    let name = node.attribute("name").unwrap_or_default().to_lowercase();
    let class = node.attribute("class").unwrap_or_default().to_lowercase();

    if let Some(encoding) = data.attribute("encoding").filter(|e| *e != "csv") {
        return Err(LoadError::UnsupportedEncoding(name, encoding.to_string()));
    }

    let cells = data
        .text()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| LoadError::InvalidTileData {
                layer: name.clone(),
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width: usize = required_attr(node, "width")?;
    let grid = TileGrid::new(width, cells);
    let offset = Vec2::new(attr_or(node, "offsetx", 0.0)?, attr_or(node, "offsety", 0.0)?);

    let layer = match class.as_str() {
        "colliders" => Layer::colliders(&name, grid, offset),
        "" => Layer::tiles(&name, grid, offset),
        other => {
            debug!("layer {} has class {:?}, drawing as tiles", name, other);
            Layer::tiles(&name, grid, offset)
        }
    };
    level.push_layer(layer);
    Ok(())
}

/// `type` before Tiled 1.9, `class` after
fn object_type<'a>(object: Node<'a, '_>) -> &'a str {
    object
        .attribute("type")
        .or_else(|| object.attribute("class"))
        .unwrap_or_default()
}

/// Position of the first `Center` object anywhere in the document
fn find_center(doc: &Document<'_>) -> Result<Option<Vec2>, LoadError> {
    let center = doc
        .descendants()
        .find(|node| node.has_tag_name("object") && object_type(*node) == "Center");

    match center {
        Some(node) => Ok(Some(Vec2::new(
            attr_or(node, "x", 0.0)?,
            attr_or(node, "y", 0.0)?,
        ))),
        None => Ok(None),
    }
}

/// First four polygon points, relative to the object, unscaled
fn stair_points(object: Node<'_, '_>, name: &str) -> Result<[Vec2; 4], LoadError> {
    let bad = || LoadError::InvalidStairs(name.to_string());

    let points = object
        .children()
        .find(|child| child.has_tag_name("polygon"))
        .and_then(|polygon| polygon.attribute("points"))
        .ok_or_else(bad)?;

    let parsed = points
        .split_whitespace()
        .take(4)
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(bad)?;

    <[Vec2; 4]>::try_from(parsed).map_err(|_| bad())
}

fn parse_attr<T: FromStr>(
    node: Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<T>, LoadError> {
    let Some(value) = node.attribute(attribute) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| LoadError::InvalidAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
            value: value.to_string(),
        })
}

fn attr_or<T: FromStr>(
    node: Node<'_, '_>,
    attribute: &'static str,
    default: T,
) -> Result<T, LoadError> {
    Ok(parse_attr(node, attribute)?.unwrap_or(default))
}

fn required_attr<T: FromStr>(node: Node<'_, '_>, attribute: &'static str) -> Result<T, LoadError> {
    parse_attr(node, attribute)?.ok_or_else(|| LoadError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute,
    })
}
