use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::capture::clock::{Clock, SystemClock};
use crate::encode::gif_sink::GifSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, RenderRequest, validate_dims};
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::{RenderSource, SvgHost};
use crate::render::surface::{FrameComposer, SurfaceOpts};

/// Pause between decode and the first frame, so the animation has started.
pub const WARMUP: Duration = Duration::from_millis(50);

/// Fewest frames a capture produces, so output always shows motion.
pub const MIN_FRAMES: u64 = 2;

/// `round(1000 / fps)`, never below 1 ms.
pub fn frame_delay_ms(fps: u32) -> u64 {
    ((1000.0 / f64::from(fps.max(1))).round() as u64).max(1)
}

/// `max(2, round(duration_ms / frame_delay_ms))`.
pub fn frame_count(duration_ms: u64, frame_delay_ms: u64) -> u64 {
    let n = (duration_ms as f64 / frame_delay_ms.max(1) as f64).round() as u64;
    n.max(MIN_FRAMES)
}

/// When each frame of a capture is taken, relative to decode completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSchedule {
    /// Spacing between frames, also each frame's display time.
    pub frame_delay: Duration,
    /// Number of frames captured.
    pub frame_count: u64,
    /// Offset of the first frame.
    pub warmup: Duration,
}

impl FrameSchedule {
    pub fn new(duration_ms: u64, fps: u32, warmup: Duration) -> SvgshotResult<Self> {
        if fps == 0 {
            return Err(SvgshotError::validation("fps must be > 0"));
        }
        let delay_ms = frame_delay_ms(fps);
        Ok(Self {
            frame_delay: Duration::from_millis(delay_ms),
            frame_count: frame_count(duration_ms, delay_ms),
            warmup,
        })
    }

    /// Due time of frame `i`. Computed from the start rather than accumulated, so slow frames
    /// do not push later ones back.
    pub fn due(&self, i: u64) -> Duration {
        let delay_ms = self.frame_delay.as_millis() as u64;
        self.warmup + Duration::from_millis(delay_ms.saturating_mul(i))
    }
}

/// Shared flag that stops an in-flight capture before its next frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Parameters of one animated capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureOpts {
    pub surface: SurfaceOpts,
    /// Animation span to cover.
    pub duration_ms: u64,
    pub fps: u32,
    pub warmup: Duration,
}

impl CaptureOpts {
    pub fn from_request(req: &RenderRequest, duration_ms: u64) -> Self {
        Self {
            surface: SurfaceOpts::from(req),
            duration_ms,
            fps: req.fps,
            warmup: WARMUP,
        }
    }
}

/// Outcome of a completed capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureStats {
    pub frames: u64,
    pub frame_delay: Duration,
    /// Clock time from decode completion to the last frame.
    pub elapsed: Duration,
}

/// One animated capture: owns its schedule, clock and cancel token.
///
/// Frames are taken strictly in order from a single decoded source; placement is computed once.
pub struct CaptureSession<C: Clock> {
    opts: CaptureOpts,
    schedule: FrameSchedule,
    clock: C,
    cancel: CancelToken,
}

impl<C: Clock> CaptureSession<C> {
    pub fn new(opts: CaptureOpts, clock: C) -> SvgshotResult<Self> {
        validate_dims(opts.surface.width, opts.surface.height)?;
        let schedule = FrameSchedule::new(opts.duration_ms, opts.fps, opts.warmup)?;
        Ok(Self {
            opts,
            schedule,
            clock,
            cancel: CancelToken::new(),
        })
    }

    /// Use `token` instead of the session's own cancel token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn schedule(&self) -> FrameSchedule {
        self.schedule
    }

    /// Decode `svg_text` once, then compose and push every scheduled frame into `sink`.
    ///
    /// Fails without retry if decoding or any frame fails, or with
    /// [`SvgshotError::Cancelled`] if the token fires; `sink.end` is then not called.
    #[tracing::instrument(skip_all, fields(frames = self.schedule.frame_count))]
    pub fn run<H: SvgHost>(
        &self,
        host: &H,
        svg_text: &str,
        sink: &mut dyn FrameSink,
    ) -> SvgshotResult<CaptureStats> {
        self.check_cancelled()?;

        let source = host.decode(svg_text)?;
        let decoded_at = self.clock.now();
        let mut composer = FrameComposer::new(self.opts.surface, source.natural_size())?;

        sink.begin(SinkConfig {
            width: self.opts.surface.width,
            height: self.opts.surface.height,
            frame_delay: self.schedule.frame_delay,
        })?;

        for i in 0..self.schedule.frame_count {
            self.clock.sleep_until(decoded_at + self.schedule.due(i));
            self.check_cancelled()?;

            let at = self.clock.now().saturating_sub(decoded_at);
            composer.compose(&source, at)?;
            sink.push_frame(FrameIndex(i), &composer.read_back())?;
            tracing::debug!(frame = i, at_ms = at.as_millis() as u64, "captured frame");
        }

        sink.end()?;
        Ok(CaptureStats {
            frames: self.schedule.frame_count,
            frame_delay: self.schedule.frame_delay,
            elapsed: self.clock.now().saturating_sub(decoded_at),
        })
    }

    /// [`Self::run`] into a [`GifSink`], returning the finished GIF bytes.
    ///
    /// Frames only differ if the host's sources change with time. [`crate::ResvgHost`] draws the
    /// static document, so its GIFs repeat one image for the whole span.
    pub fn capture_gif<H: SvgHost>(&self, host: &H, svg_text: &str) -> SvgshotResult<Vec<u8>> {
        let mut sink = GifSink::new();
        let stats = self.run(host, svg_text, &mut sink)?;
        let bytes = sink.into_bytes()?;
        tracing::info!(frames = stats.frames, bytes = bytes.len(), "captured gif");
        Ok(bytes)
    }

    fn check_cancelled(&self) -> SvgshotResult<()> {
        if self.cancel.is_cancelled() {
            return Err(SvgshotError::Cancelled);
        }
        Ok(())
    }
}

/// Capture `svg_text` in real time as a looping GIF covering `duration_ms`.
///
/// With [`crate::ResvgHost`] every frame shows the document's static state; SMIL and CSS
/// animations are not evaluated.
pub fn capture_gif<H: SvgHost>(
    host: &H,
    svg_text: &str,
    req: &RenderRequest,
    duration_ms: u64,
) -> SvgshotResult<Vec<u8>> {
    req.validate()?;
    CaptureSession::new(
        CaptureOpts::from_request(req, duration_ms),
        SystemClock::new(),
    )?
    .capture_gif(host, svg_text)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
