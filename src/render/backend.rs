use std::time::Duration;

use resvg::tiny_skia;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::SvgshotResult;
use crate::foundation::math::demultiply_rgba8_in_place;

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from a surface are **premultiplied alpha**. The `premultiplied` flag makes
/// this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert into straight (non-premultiplied) alpha, as image encoders expect.
    pub fn into_straight_alpha(mut self) -> Self {
        if self.premultiplied {
            demultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }
}

/// Decodes SVG text into something that can be drawn.
///
/// This is the boundary to the vector renderer: the rest of the crate only does placement,
/// scheduling and encoding.
pub trait SvgHost {
    /// Decoded document type.
    type Source: RenderSource;

    /// Decode `svg_text`. Fails with [`crate::SvgshotError::Render`] when the document cannot be
    /// rendered.
    fn decode(&self, svg_text: &str) -> SvgshotResult<Self::Source>;
}

/// A decoded document whose appearance may depend on time since decode.
pub trait RenderSource {
    /// Intrinsic size, or `None` when the document has no usable size.
    fn natural_size(&self) -> Option<Size>;

    /// Draw the document state at `at` (time since decode) stretched onto `placement`.
    ///
    /// `placement` is in target pixel space and may extend beyond the target bounds.
    fn draw(
        &self,
        target: &mut tiny_skia::PixmapMut<'_>,
        placement: Rect,
        at: Duration,
    ) -> SvgshotResult<()>;
}
