use std::time::Duration;

use crate::encode::still::encode_still;
use crate::foundation::core::{ExportFormat, RenderRequest, validate_dims};
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::{RenderSource, SvgHost};
use crate::render::surface::{FrameComposer, SurfaceOpts};

/// Render one frame of `svg_text` at `req` size and encode it as PNG or WebP.
///
/// The document fills the surface with its aspect ratio preserved; overflow is cropped.
/// `req.fps` is not consulted.
#[tracing::instrument(skip(host, svg_text), fields(w = req.width, h = req.height, format = ?req.format))]
pub fn rasterize_static<H: SvgHost>(
    host: &H,
    svg_text: &str,
    req: &RenderRequest,
) -> SvgshotResult<Vec<u8>> {
    if !matches!(req.format, ExportFormat::Png | ExportFormat::Webp) {
        return Err(SvgshotError::validation(format!(
            "static rasterization produces png or webp, not {}",
            req.format.extension()
        )));
    }
    validate_dims(req.width, req.height)?;

    let source = host.decode(svg_text)?;
    let mut composer = FrameComposer::new(SurfaceOpts::from(req), source.natural_size())?;
    composer.compose(&source, Duration::ZERO)?;

    let bytes = encode_still(composer.read_back(), req.format)?;
    tracing::debug!(bytes = bytes.len(), "rasterized still");
    Ok(bytes)
}
