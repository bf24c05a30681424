use std::time::Duration;

use resvg::tiny_skia;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::{RenderSource, SvgHost};

/// [`SvgHost`] backed by `usvg` parsing and `resvg` rasterization.
///
/// `resvg` renders the static document: SMIL and CSS animations are not evaluated, so every
/// time offset yields the document's base state.
pub struct ResvgHost {
    opts: usvg::Options<'static>,
}

impl ResvgHost {
    /// Host with system fonts loaded, so `<text>` renders.
    pub fn new() -> Self {
        let mut opts = usvg::Options::default();
        opts.fontdb_mut().load_system_fonts();
        Self { opts }
    }

    /// Host without any fonts. Text nodes are dropped; useful where font loading is too slow.
    pub fn without_fonts() -> Self {
        Self {
            opts: usvg::Options::default(),
        }
    }
}

impl Default for ResvgHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgHost for ResvgHost {
    type Source = ResvgSource;

    fn decode(&self, svg_text: &str) -> SvgshotResult<ResvgSource> {
        let tree = usvg::Tree::from_str(svg_text, &self.opts)
            .map_err(|e| SvgshotError::render(format!("svg render failed: {e}")))?;
        Ok(ResvgSource { tree })
    }
}

/// A parsed `usvg` tree.
pub struct ResvgSource {
    tree: usvg::Tree,
}

impl RenderSource for ResvgSource {
    fn natural_size(&self) -> Option<Size> {
        let size = self.tree.size();
        let (w, h) = (f64::from(size.width()), f64::from(size.height()));
        (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then(|| Size::new(w, h))
    }

    fn draw(
        &self,
        target: &mut tiny_skia::PixmapMut<'_>,
        placement: Rect,
        _at: Duration,
    ) -> SvgshotResult<()> {
        let natural = self
            .natural_size()
            .ok_or_else(|| SvgshotError::render("svg has invalid width/height"))?;

        let sx = (placement.width() / natural.width) as f32;
        let sy = (placement.height() / natural.height) as f32;
        let (tx, ty) = (placement.x0 as f32, placement.y0 as f32);
        let xform = tiny_skia::Transform::from_row(sx, 0.0, 0.0, sy, tx, ty);

        resvg::render(&self.tree, xform, target);
        Ok(())
    }
}
