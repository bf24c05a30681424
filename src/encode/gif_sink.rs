use std::borrow::Cow;
use std::time::Duration;

use crate::encode::quantize::{IndexedFrame, quantize_frame};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::FrameRGBA;

/// GIF frame delays are stored in hundredths of a second.
pub fn gif_delay_cs(delay: Duration) -> u16 {
    (delay.as_secs_f64() * 100.0)
        .round()
        .clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Sink that quantizes each frame and assembles a looping GIF in memory.
#[derive(Default)]
pub struct GifSink {
    encoder: Option<gif::Encoder<Vec<u8>>>,
    cfg: Option<SinkConfig>,
    delay_cs: u16,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
    bytes: Option<Vec<u8>>,
}

impl GifSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// The finished GIF. Fails unless `end` completed.
    pub fn into_bytes(self) -> SvgshotResult<Vec<u8>> {
        match self.bytes {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(SvgshotError::render("gif encoder produced no data")),
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SvgshotResult<()> {
        let (Ok(w), Ok(h)) = (u16::try_from(cfg.width), u16::try_from(cfg.height)) else {
            return Err(SvgshotError::validation(format!(
                "gif size {}x{} exceeds {}x{}",
                cfg.width,
                cfg.height,
                u16::MAX,
                u16::MAX
            )));
        };
        if w == 0 || h == 0 {
            return Err(SvgshotError::validation(
                "gif sink width/height must be non-zero",
            ));
        }

        let mut encoder = gif::Encoder::new(Vec::new(), w, h, &[])
            .map_err(|e| SvgshotError::render(format!("start gif stream: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| SvgshotError::render(format!("write gif loop extension: {e}")))?;

        self.encoder = Some(encoder);
        self.delay_cs = gif_delay_cs(cfg.frame_delay);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SvgshotResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| SvgshotError::render("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(SvgshotError::render(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SvgshotError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        let indexed = quantize_frame(frame)?;
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(SvgshotError::render("gif sink is already finalized"));
        };
        write_indexed(encoder, indexed, self.delay_cs, idx)?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> SvgshotResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| SvgshotError::render("gif sink not started"))?;
        let bytes = encoder
            .into_inner()
            .map_err(|e| SvgshotError::render(format!("finish gif stream: {e}")))?;
        self.bytes = Some(bytes);
        self.cfg = None;
        Ok(())
    }
}

fn write_indexed(
    encoder: &mut gif::Encoder<Vec<u8>>,
    indexed: IndexedFrame,
    delay_cs: u16,
    idx: FrameIndex,
) -> SvgshotResult<()> {
    let (Ok(width), Ok(height)) = (u16::try_from(indexed.width), u16::try_from(indexed.height))
    else {
        return Err(SvgshotError::validation("gif frame exceeds u16 dimensions"));
    };
    let gif_frame = gif::Frame {
        width,
        height,
        delay: delay_cs,
        dispose: gif::DisposalMethod::Background,
        transparent: indexed.transparent,
        palette: Some(indexed.palette),
        buffer: Cow::Owned(indexed.indices),
        ..gif::Frame::default()
    };
    encoder
        .write_frame(&gif_frame)
        .map_err(|e| SvgshotError::render(format!("write gif frame {}: {e}", idx.0)))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif_sink.rs"]
mod tests;
