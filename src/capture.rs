//! Real-time capture of animated documents.

/// Time sources for frame scheduling.
pub mod clock;
/// Frame schedule, cancellation and the capture loop.
pub mod session;
