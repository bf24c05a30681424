//! Encoders turning composed frames into output bytes.

/// Looping GIF assembly.
pub mod gif_sink;
/// Palette reduction for indexed frames.
pub mod quantize;
/// Frame sink trait and built-in sinks.
pub mod sink;
/// PNG and WebP stills.
pub mod still;
