//! svgshot validates and repairs SVG text, then rasterizes it to PNG, WebP or a looping GIF.
//!
//! - [`normalize`] turns raw input into a [`NormalizedSvg`]
//! - [`rasterize_static`] renders one frame at a requested size
//! - [`CaptureSession`] captures an animated document frame by frame into a [`FrameSink`]
//! - [`Exporter`] dispatches a [`RenderRequest`] to the right path and returns a [`Blob`]
#![forbid(unsafe_code)]

mod foundation;

/// Real-time capture of animated documents.
pub mod capture;
/// Parsing, repair and timing analysis of SVG text.
pub mod document;
pub mod encode;
pub mod export;
/// Placement, composition and the vector renderer boundary.
pub mod render;
pub mod session;

pub use crate::foundation::core::{
    Blob, DEFAULT_DIM, DEFAULT_FPS, ExportFormat, FrameIndex, MAX_DIM, Rect, RenderRequest, Size,
};
pub use crate::foundation::error::{SvgshotError, SvgshotResult};

pub use crate::capture::clock::{Clock, ManualClock, SystemClock};
pub use crate::capture::session::{
    CancelToken, CaptureOpts, CaptureSession, CaptureStats, FrameSchedule, capture_gif,
};
pub use crate::document::duration::{DEFAULT_DURATION_MS, estimate_duration_ms, parse_dur_value};
pub use crate::document::normalize::{NormalizedSvg, normalize};
pub use crate::encode::gif_sink::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::export::{Exporter, format_capture_label};
pub use crate::render::backend::{FrameRGBA, RenderSource, SvgHost};
pub use crate::render::raster::rasterize_static;
pub use crate::render::resvg_host::ResvgHost;
pub use crate::render::surface::SurfaceOpts;
pub use crate::session::Session;
