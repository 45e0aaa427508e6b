// Visibility culling and painter's-algorithm ordering

use crate::engine::renderer::View;
use crate::game::characters::Sprite;

/// Whether any part of the sprite can be on screen.
///
/// The footprint's top-left corner must lie strictly inside the viewport
/// widened by one footprint on each side.
pub fn is_visible(view: &View, sprite: &Sprite) -> bool {
    view.viewport()
        .admits_footprint(sprite.screen_corner(view), sprite.scaled_size())
}

/// Cull, then order back to front by bottom edge.
///
/// The sort is stable: sprites at the same depth keep the order they were
/// gathered in.
pub fn draw_order<'a>(
    view: &View,
    sprites: impl IntoIterator<Item = &'a Sprite>,
) -> Vec<&'a Sprite> {
    let mut visible: Vec<&Sprite> = sprites
        .into_iter()
        .filter(|sprite| is_visible(view, sprite))
        .collect();
    visible.sort_by(|a, b| a.depth().total_cmp(&b.depth()));
    visible
}
