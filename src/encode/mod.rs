//! Encoding sinks.
//!
//! Sinks consume rasterized frames in index order and are driven by `Codec::encode_to_sink`.

/// `ffmpeg`-based sink (video output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG directory sink.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
