use crate::capture::clock::{Clock, SystemClock};
use crate::capture::session::{CancelToken, CaptureOpts, CaptureSession};
use crate::document::normalize::NormalizedSvg;
use crate::foundation::core::{Blob, ExportFormat, RenderRequest};
use crate::foundation::error::SvgshotResult;
use crate::render::backend::SvgHost;
use crate::render::raster::rasterize_static;

/// Turns a normalized document into an output blob, one request at a time.
///
/// The clock only matters for GIF exports, which capture in real time.
pub struct Exporter<H, C = SystemClock> {
    host: H,
    clock: C,
    cancel: CancelToken,
}

impl<H: SvgHost> Exporter<H, SystemClock> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            clock: SystemClock::new(),
            cancel: CancelToken::new(),
        }
    }
}

impl<H: SvgHost, C: Clock> Exporter<H, C> {
    /// Swap the capture clock, e.g. for a [`crate::ManualClock`] in tests.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Exporter<H, C2> {
        Exporter {
            host: self.host,
            clock,
            cancel: self.cancel,
        }
    }

    /// Share `token` with in-flight GIF captures. Once cancelled, later GIF exports fail too.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Produce the blob for `req`.
    ///
    /// `svg` returns the normalized text unchanged. `png` and `webp` rasterize once. `gif`
    /// captures for the document's estimated animation span at `req.fps`.
    #[tracing::instrument(skip(self, doc), fields(format = ?req.format, w = req.width, h = req.height))]
    pub fn export(&self, doc: &NormalizedSvg, req: &RenderRequest) -> SvgshotResult<Blob> {
        let bytes = match req.format {
            ExportFormat::Svg => doc.as_str().as_bytes().to_vec(),
            ExportFormat::Png | ExportFormat::Webp => {
                rasterize_static(&self.host, doc.as_str(), req)?
            }
            ExportFormat::Gif => {
                req.validate()?;
                let duration_ms = doc.duration_ms();
                tracing::debug!(duration_ms, fps = req.fps, "starting gif capture");
                CaptureSession::new(CaptureOpts::from_request(req, duration_ms), &self.clock)?
                    .with_cancel(self.cancel.clone())
                    .capture_gif(&self.host, doc.as_str())?
            }
        };

        let blob = Blob::new(req.format, bytes);
        tracing::info!(mime = blob.mime, bytes = blob.len(), "export finished");
        Ok(blob)
    }
}

/// Status text shown while a GIF capture is running, e.g. `Capturing 2.0s…`.
pub fn format_capture_label(duration_ms: u64) -> String {
    format!("Capturing {:.1}s…", duration_ms as f64 / 1000.0)
}
