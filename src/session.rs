use crate::capture::clock::Clock;
use crate::document::normalize::{NormalizedSvg, normalize};
use crate::export::Exporter;
use crate::foundation::core::{Blob, RenderRequest};
use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::SvgHost;

/// The document currently loaded by a shell.
///
/// Holds the last successfully normalized input, so the preview and every export read the same
/// text.
#[derive(Clone, Debug, Default)]
pub struct Session {
    current: Option<NormalizedSvg>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` and make it current.
    ///
    /// Whitespace-only input clears the session. On failure the previous document stays loaded
    /// and the error is returned.
    pub fn update(&mut self, raw: &str) -> SvgshotResult<Option<&NormalizedSvg>> {
        if raw.trim().is_empty() {
            self.current = None;
            return Ok(None);
        }
        let doc = normalize(raw)?;
        Ok(Some(&*self.current.insert(doc)))
    }

    pub fn current(&self) -> Option<&NormalizedSvg> {
        self.current.as_ref()
    }

    pub fn is_animated(&self) -> bool {
        self.current.as_ref().is_some_and(NormalizedSvg::is_animated)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Export the current document.
    pub fn export<H: SvgHost, C: Clock>(
        &self,
        exporter: &Exporter<H, C>,
        req: &RenderRequest,
    ) -> SvgshotResult<Blob> {
        let doc = self
            .current
            .as_ref()
            .ok_or_else(|| SvgshotError::input("no document loaded"))?;
        exporter.export(doc, req)
    }
}
