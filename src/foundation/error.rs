pub type SvgshotResult<T> = Result<T, SvgshotError>;

/// Error taxonomy shared by normalization, rasterization and capture.
#[derive(thiserror::Error, Debug)]
pub enum SvgshotError {
    /// Raw input was empty or whitespace-only.
    #[error("input error: {0}")]
    Input(String),

    /// Input was not well-formed XML, or its root element is not `svg`.
    #[error("parse error: {0}")]
    Parse(String),

    /// Decoding the SVG or encoding the output image failed.
    #[error("render error: {0}")]
    Render(String),

    /// Request parameters are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A capture was stopped through its cancel token.
    #[error("capture cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgshotError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The message without its category prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Input(m) | Self::Parse(m) | Self::Render(m) | Self::Validation(m) => m.clone(),
            Self::Cancelled => "capture cancelled".to_owned(),
            Self::Other(e) => e.to_string(),
        }
    }

    /// The message clipped to `max_chars` characters, for one-line status display.
    pub fn short_message(&self, max_chars: usize) -> String {
        self.message().chars().take(max_chars).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
