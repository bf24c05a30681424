use std::time::Duration;

use resvg::tiny_skia;

use crate::foundation::core::{Rect, RenderRequest, Size, validate_dims};
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::{FrameRGBA, RenderSource};
use crate::render::placement::aspect_fill;

/// Destination surface settings shared by the still and animated paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOpts {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Skip the opaque white fill.
    pub transparent_background: bool,
    /// Clip drawing to the disc inscribed in the surface.
    pub circular_crop: bool,
}

impl From<&RenderRequest> for SurfaceOpts {
    fn from(req: &RenderRequest) -> Self {
        Self {
            width: req.width,
            height: req.height,
            transparent_background: req.transparent_background,
            circular_crop: req.circular_crop,
        }
    }
}

/// Fixed-size surface that composes one frame at a time.
///
/// Placement and the circular clip mask are computed once at construction and reused for every
/// frame.
pub struct FrameComposer {
    opts: SurfaceOpts,
    placement: Rect,
    pixmap: tiny_skia::Pixmap,
    // Present only with a circular crop: the source is drawn here, then masked onto `pixmap`.
    clip: Option<(tiny_skia::Pixmap, tiny_skia::Mask)>,
}

impl FrameComposer {
    pub fn new(opts: SurfaceOpts, natural: Option<Size>) -> SvgshotResult<Self> {
        validate_dims(opts.width, opts.height)?;

        let pixmap = alloc_pixmap(opts.width, opts.height)?;
        let clip = if opts.circular_crop {
            Some((
                alloc_pixmap(opts.width, opts.height)?,
                circle_mask(opts.width, opts.height)?,
            ))
        } else {
            None
        };
        let dest = Size::new(f64::from(opts.width), f64::from(opts.height));

        Ok(Self {
            opts,
            placement: aspect_fill(natural, dest),
            pixmap,
            clip,
        })
    }

    /// Where the source lands in surface pixel space.
    pub fn placement(&self) -> Rect {
        self.placement
    }

    /// Clear, fill the background, then draw `source` at `at` through the optional clip.
    pub fn compose<S: RenderSource + ?Sized>(
        &mut self,
        source: &S,
        at: Duration,
    ) -> SvgshotResult<()> {
        if self.opts.transparent_background {
            self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        } else {
            self.pixmap.fill(tiny_skia::Color::WHITE);
        }

        match self.clip.as_mut() {
            None => source.draw(&mut self.pixmap.as_mut(), self.placement, at),
            Some((layer, mask)) => {
                layer.fill(tiny_skia::Color::TRANSPARENT);
                source.draw(&mut layer.as_mut(), self.placement, at)?;
                self.pixmap.draw_pixmap(
                    0,
                    0,
                    layer.as_ref(),
                    &tiny_skia::PixmapPaint::default(),
                    tiny_skia::Transform::identity(),
                    Some(&*mask),
                );
                Ok(())
            }
        }
    }

    /// Copy the current surface out as a premultiplied frame.
    pub fn read_back(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.opts.width,
            height: self.opts.height,
            data: self.pixmap.data().to_vec(),
            premultiplied: true,
        }
    }
}

fn alloc_pixmap(width: u32, height: u32) -> SvgshotResult<tiny_skia::Pixmap> {
    tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        SvgshotError::render(format!("failed to allocate {width}x{height} surface"))
    })
}

fn circle_mask(width: u32, height: u32) -> SvgshotResult<tiny_skia::Mask> {
    let (w, h) = (width as f32, height as f32);
    let path = tiny_skia::PathBuilder::from_circle(w / 2.0, h / 2.0, w.min(h) / 2.0)
        .ok_or_else(|| SvgshotError::render("failed to build circular clip path"))?;
    let mut mask = tiny_skia::Mask::new(width, height)
        .ok_or_else(|| SvgshotError::render("failed to allocate clip mask"))?;
    mask.fill_path(
        &path,
        tiny_skia::FillRule::Winding,
        true,
        tiny_skia::Transform::identity(),
    );
    Ok(mask)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
