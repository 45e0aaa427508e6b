// Rendering collaborators
//
// The scene never touches pixels. Everything it draws goes through a
// `DrawTarget`, which blits a sub-rectangle of a named image to a
// destination rectangle on screen.

mod background;
mod view;

pub use background::{compose_background, ImageRepeat};
pub use view::{View, Viewport};

use crate::core::math::Rect;

/// Anything the scene can draw into
pub trait DrawTarget {
    /// Copy `source` (or the whole image when `None`) of `image` into `dest`
    fn blit(&mut self, image: &str, source: Option<Rect>, dest: Rect);
}

/// A single recorded blit
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub image: String,
    pub source: Option<Rect>,
    pub dest: Rect,
}

/// Draw target that records every blit in submission order.
///
/// Used by the headless runner and by tests that assert on draw order.
#[derive(Debug, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded calls (call at start of frame)
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of calls recorded
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Recorded calls for one image, in order
    pub fn calls_for<'a>(&'a self, image: &'a str) -> impl Iterator<Item = &'a DrawCall> + 'a {
        self.calls.iter().filter(move |call| call.image == image)
    }
}

impl DrawTarget for DrawList {
    fn blit(&mut self, image: &str, source: Option<Rect>, dest: Rect) {
        self.calls.push(DrawCall {
            image: image.to_string(),
            source,
            dest,
        });
    }
}
