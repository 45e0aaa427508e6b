// Parallax background compositing for image layers

use glam::Vec2;

use super::{DrawTarget, View};
use crate::core::math::Rect;

/// Which axes an image layer tiles along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageRepeat {
    pub x: bool,
    pub y: bool,
}

/// Fill the view with a background image.
///
/// * no repeat: the image covers the whole canvas (like CSS `cover`)
/// * repeat x: one horizontal strip of tiles
/// * repeat x+y: a full grid of tiles
///
/// The parallax shift is the scroll offset scaled by `parallax`, wrapped
/// to the image size. Repeat-y on its own draws nothing.
pub fn compose_background(
    target: &mut dyn DrawTarget,
    view: &View,
    image: &str,
    size: Vec2,
    repeat: ImageRepeat,
    parallax: Vec2,
) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    let shift = Vec2::new(
        (view.offset.x * parallax.x) % size.x,
        (view.offset.y * parallax.y) % size.y,
    );
    let canvas = view.size();

    match (repeat.x, repeat.y) {
        (false, false) => {
            let cover = cover_canvas(canvas, size);
            target.blit(image, None, cover.translated(shift));
        }
        (true, false) => {
            let mut x = shift.x - size.x;
            while x < canvas.x {
                target.blit(image, None, Rect::from_origin_size(Vec2::new(x, shift.y), size));
                x += size.x;
            }
        }
        (true, true) => {
            let mut y = shift.y - size.y;
            while y < canvas.y {
                let mut x = shift.x - size.x;
                while x < canvas.x {
                    target.blit(image, None, Rect::from_origin_size(Vec2::new(x, y), size));
                    x += size.x;
                }
                y += size.y;
            }
        }
        (false, true) => {}
    }
}

/// Destination that covers the canvas while keeping the image aspect ratio
fn cover_canvas(canvas: Vec2, image: Vec2) -> Rect {
    let canvas_ratio = canvas.x / canvas.y;
    let image_ratio = image.x / image.y;

    if canvas_ratio > image_ratio {
        let height = canvas.x / image_ratio;
        Rect::from_origin_size(
            Vec2::new(0.0, (canvas.y - height) / 2.0),
            Vec2::new(canvas.x, height),
        )
    } else {
        let width = canvas.y * image_ratio;
        Rect::from_origin_size(
            Vec2::new((canvas.x - width) / 2.0, 0.0),
            Vec2::new(width, canvas.y),
        )
    }
}
