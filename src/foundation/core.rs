use crate::foundation::error::{SvgshotError, SvgshotResult};

pub use kurbo::{Rect, Size};

/// Largest accepted output edge, in pixels.
pub const MAX_DIM: u32 = 16_384;

/// Output edge used when the caller does not pick a size.
pub const DEFAULT_DIM: u32 = 256;

/// Frame rate used for GIF capture when the caller does not pick one.
pub const DEFAULT_FPS: u32 = 20;

/// 0-based index of a captured frame, in capture order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

/// Output encoding of an export.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The normalized document itself, no rasterization.
    Svg,
    /// Single frame, PNG.
    #[default]
    Png,
    /// Single frame, lossless WebP.
    Webp,
    /// Looping animated GIF captured over the document's animation span.
    Gif,
}

impl ExportFormat {
    /// MIME type of the produced blob.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    /// Whether the export goes through a raster pipeline.
    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// Export parameters produced by the shell and consumed once per export call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output encoding.
    pub format: ExportFormat,
    /// Skip the opaque white background fill.
    pub transparent_background: bool,
    /// Restrict drawing to the disc inscribed in the output.
    pub circular_crop: bool,
    /// Capture rate for GIF exports.
    pub fps: u32,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIM,
            height: DEFAULT_DIM,
            format: ExportFormat::default(),
            transparent_background: false,
            circular_crop: false,
            fps: DEFAULT_FPS,
        }
    }
}

impl RenderRequest {
    /// Reject sizes and rates the raster pipelines cannot honor.
    pub fn validate(&self) -> SvgshotResult<()> {
        validate_dims(self.width, self.height)?;
        if self.fps == 0 {
            return Err(SvgshotError::validation("fps must be > 0"));
        }
        Ok(())
    }

    /// Output size as floating point, for placement math.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Default download name, e.g. `icon-256x256.png`.
    pub fn file_name(&self) -> String {
        match self.format {
            ExportFormat::Svg => "icon.svg".to_owned(),
            f => format!("icon-{}x{}.{}", self.width, self.height, f.extension()),
        }
    }

    /// One-line summary such as `256 × 256 · PNG · transparent · circle`.
    pub fn describe(&self, is_animated: bool) -> String {
        let fmt = self.format;
        let mut parts = Vec::new();
        if fmt.is_raster() {
            parts.push(format!("{} × {}", self.width, self.height));
        }
        parts.push(fmt.extension().to_uppercase());
        if fmt == ExportFormat::Gif && is_animated {
            parts.push("animated".to_owned());
        }
        if self.transparent_background && matches!(fmt, ExportFormat::Png | ExportFormat::Webp) {
            parts.push("transparent".to_owned());
        }
        if self.circular_crop && fmt.is_raster() {
            parts.push("circle".to_owned());
        }
        parts.join(" · ")
    }
}

pub(crate) fn validate_dims(width: u32, height: u32) -> SvgshotResult<()> {
    if width == 0 || height == 0 {
        return Err(SvgshotError::validation(
            "output width/height must be non-zero",
        ));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(SvgshotError::validation(format!(
            "output size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok(())
}

/// Encoded export output tagged with its MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    /// MIME type, e.g. `image/png`.
    pub mime: &'static str,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            mime: format.mime(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
