use std::io::Cursor;

use crate::foundation::core::ExportFormat;
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::FrameRGBA;

/// Encode a single frame as PNG or lossless WebP.
pub fn encode_still(frame: FrameRGBA, format: ExportFormat) -> SvgshotResult<Vec<u8>> {
    let image_format = match format {
        ExportFormat::Png => image::ImageFormat::Png,
        ExportFormat::Webp => image::ImageFormat::WebP,
        other => {
            return Err(SvgshotError::validation(format!(
                "{} is not a still image format",
                other.extension()
            )));
        }
    };

    let frame = frame.into_straight_alpha();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .ok_or_else(|| SvgshotError::validation("frame.data size mismatch with width*height*4"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image_format)
        .map_err(|e| {
            SvgshotError::render(format!("encode {} failed: {e}", format.extension()))
        })?;

    if buf.is_empty() {
        return Err(SvgshotError::render("canvas export failed"));
    }
    Ok(buf)
}
